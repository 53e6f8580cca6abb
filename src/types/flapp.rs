// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::api::core::v1::PodTemplateSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "fedlearner.k8s.io", version = "v1alpha1", kind = "FLApp")]
#[kube(plural = "flapps", shortname = "flapp")]
#[kube(namespaced)]
#[kube(status = "FLAppStatus")]
#[serde(rename_all = "camelCase")]
pub struct FLAppSpec {
    /// Replica type (e.g. "Master", "Worker") to its pod layout
    #[serde(default)]
    pub fl_replica_specs: BTreeMap<String, ReplicaSpec>,
    /// Either "Leader" or "Follower"
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub peer_specs: BTreeMap<String, PeerSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_pod_policy: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
    /// Whether replicas of this type are paired one to one with the peer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeerSpec {
    #[serde(rename = "peerURL")]
    pub peer_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_headers: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FLAppStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_state: Option<FLAppState>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fl_replica_status: BTreeMap<String, ReplicaStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<Time>,
}

/// Pod names per phase for one replica type
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaStatus {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub local: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub remote: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub active: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub succeeded: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub failed: BTreeSet<String>,
}

/// Lifecycle state written by the FLApp controller
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub enum FLAppState {
    #[serde(rename = "FLStateNew")]
    New,
    #[serde(rename = "FLStateBootstrapped")]
    Bootstrapped,
    #[serde(rename = "FLStateSyncSent")]
    SyncSent,
    #[serde(rename = "FLStateRunning")]
    Running,
    #[serde(rename = "FLStateComplete")]
    Complete,
    #[serde(rename = "FLStateFailing")]
    Failing,
    #[serde(rename = "FLStateShutDown")]
    ShutDown,
    #[serde(rename = "FLStateFailed")]
    Failed,
    #[serde(other)]
    Unknown,
}

impl FLAppState {
    /// No further transitions happen from a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::ShutDown | Self::Failed)
    }
}

impl FLApp {
    /// Current lifecycle state, `New` until the controller reports one
    pub fn app_state(&self) -> FLAppState {
        self.status
            .as_ref()
            .and_then(|s| s.app_state)
            .unwrap_or(FLAppState::New)
    }
}
