// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes label keys read by the API server
pub mod labels {
    /// Set on every pod created for an FLApp, value is the FLApp name
    pub const APP_NAME: &str = "app-name";
}

/// Field selector keys used for remote list calls
pub mod fields {
    /// Name of the object an event refers to
    pub const INVOLVED_OBJECT_NAME: &str = "involvedObject.name";
}

/// Top-level keys of the JSON response envelopes
pub mod envelope {
    pub const NAMESPACES: &str = "namespaces";
    pub const PODS: &str = "pods";
    pub const POD: &str = "pod";
    pub const EVENTS: &str = "events";
    pub const FLAPP: &str = "flapp";
    pub const FLAPPS: &str = "flapps";
    pub const ERROR: &str = "error";
}

/// Server defaults, overridable through the environment
pub mod defaults {
    pub const LISTEN_ADDRESS: &str = "0.0.0.0:8080";
    /// Deadline in seconds for the startup cache sync
    pub const CACHE_SYNC_TIMEOUT_SECS: u64 = 60;
}
