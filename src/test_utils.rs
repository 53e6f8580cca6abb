// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses and populating caches.

use http::{Request, Response};
use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::runtime::reflector::{self, Store};
use kube::runtime::watcher;
use kube::{Client, Resource};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

use crate::constants::labels;

pub const FLAPPS_PATH: &str = "/apis/fedlearner.k8s.io/v1alpha1/namespaces/default/flapps";

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// A DELETE on a path with a registered GET response removes that response, so
/// a later GET of the same object sees a 404 like on a real API server.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();

        if method == "DELETE" {
            return responses
                .remove(&("GET".to_string(), path.to_string()))
                .filter(|(status, _)| *status == 200);
        }

        responses
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| {
                let name = path.rsplit('/').next().unwrap_or_default().to_string();
                (404, not_found_json("object", &name))
            });
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Build a store that has already completed its initial sync with `objects`
pub fn ready_store<K>(objects: Vec<K>) -> Store<K>
where
    K: Resource + Clone + 'static,
    K::DynamicType: Eq + Hash + Clone + Default,
{
    let (reader, mut writer) = reflector::store();
    writer.apply_watcher_event(&watcher::Event::Init);
    for object in objects {
        writer.apply_watcher_event(&watcher::Event::InitApply(object));
    }
    writer.apply_watcher_event(&watcher::Event::InitDone);
    reader
}

pub fn make_pod(namespace: &str, name: &str, app_name: Option<&str>) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: app_name
                .map(|app| BTreeMap::from([(labels::APP_NAME.to_string(), app.to_string())])),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn make_namespace(name: &str) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Create a mock FLApp JSON response
pub fn flapp_json(namespace: &str, name: &str) -> String {
    flapp_value(namespace, name).to_string()
}

pub fn flapp_value(namespace: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "fedlearner.k8s.io/v1alpha1",
        "kind": "FLApp",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        },
        "spec": {
            "role": "Leader",
            "flReplicaSpecs": {
                "Worker": { "replicas": 1 }
            }
        }
    })
}

/// Create a mock FLAppList JSON response
pub fn flapp_list_json(namespace: &str, names: &[&str]) -> String {
    serde_json::json!({
        "apiVersion": "fedlearner.k8s.io/v1alpha1",
        "kind": "FLAppList",
        "metadata": { "resourceVersion": "1" },
        "items": names.iter().map(|n| flapp_value(namespace, n)).collect::<Vec<_>>()
    })
    .to_string()
}

/// Create a mock EventList JSON response with one event per involved object
pub fn event_list_json(namespace: &str, involved: &[&str]) -> String {
    let items: Vec<_> = involved
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({
                "metadata": {
                    "name": format!("{}.{}", name, i),
                    "namespace": namespace
                },
                "involvedObject": {
                    "kind": "Pod",
                    "name": name,
                    "namespace": namespace
                },
                "reason": "Scheduled",
                "message": format!("Successfully assigned {}/{}", namespace, name)
            })
        })
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "EventList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
