// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Background watch loops feeding the local object caches

use crate::types::flapp::FLApp;
use futures::StreamExt;
use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::runtime::{reflector, reflector::Store, watcher, WatchStreamExt};
use kube::{Api, Client, Resource};
use kube_runtime::watcher::Config as WatcherConfig;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::hash::Hash;
use std::pin::pin;
use tracing::{debug, info, warn};

/// Caches for every kind the API server reads locally.
/// The FLApp cache is only used to gate startup on its initial sync.
#[derive(Clone)]
pub struct Informers {
    pub pods: Store<Pod>,
    pub namespaces: Store<Namespace>,
    pub flapps: Store<FLApp>,
}

impl Informers {
    /// Spawn one reflector per kind. Must be called from within a tokio runtime.
    pub fn start(client: &Client) -> Self {
        info!("Starting informers for pods, namespaces and flapps");
        Self {
            pods: spawn_reflector(Api::all(client.clone())),
            namespaces: spawn_reflector(Api::all(client.clone())),
            flapps: spawn_reflector(Api::all(client.clone())),
        }
    }
}

fn spawn_reflector<K>(api: Api<K>) -> Store<K>
where
    K: Resource + Clone + DeserializeOwned + Debug + Send + Sync + 'static,
    K::DynamicType: Eq + Hash + Clone + Default + Send + Sync,
{
    let kind = K::kind(&K::DynamicType::default()).to_string();
    let (reader, writer) = reflector::store();
    let stream = reflector(writer, watcher(api, WatcherConfig::default()).default_backoff());

    tokio::spawn(async move {
        let mut stream = pin!(stream);
        while let Some(event) = stream.next().await {
            match event {
                Ok(watcher::Event::InitDone) => debug!("Initial list of {} replayed", kind),
                Ok(_) => {}
                Err(e) => warn!("Error watching {}: {}", kind, e),
            }
        }
        warn!("Watch stream for {} terminated", kind);
    });

    reader
}
