// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Request handlers over cached and remote cluster objects.

use crate::constants::{envelope, fields, labels};
use crate::error::{ApiServerError, Result};
use crate::kubernetes::{Informers, Lister};
use crate::types::flapp::FLApp;
use axum::Json;
use k8s_openapi::api::core::v1::{Event, Namespace, Pod};
use kube::api::{DeleteParams, ListParams, ObjectList, PostParams};
use kube::core::Selector;
use kube::{Api, Client};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A JSON object with a single top-level key naming the payload
pub type Envelope<T> = Json<BTreeMap<&'static str, T>>;

fn wrap<T>(key: &'static str, value: T) -> Envelope<T> {
    Json(BTreeMap::from([(key, value)]))
}

pub struct Handler {
    client: Client,
    pods: Arc<dyn Lister<Pod>>,
    namespaces: Arc<dyn Lister<Namespace>>,
    flapps: Arc<dyn Lister<FLApp>>,
}

impl Handler {
    pub fn new(
        client: Client,
        pods: Arc<dyn Lister<Pod>>,
        namespaces: Arc<dyn Lister<Namespace>>,
        flapps: Arc<dyn Lister<FLApp>>,
    ) -> Self {
        Self {
            client,
            pods,
            namespaces,
            flapps,
        }
    }

    pub fn from_informers(client: Client, informers: Informers) -> Self {
        Self::new(
            client,
            Arc::new(informers.pods),
            Arc::new(informers.namespaces),
            Arc::new(informers.flapps),
        )
    }

    /// Block until the pod, namespace and FLApp caches have synced.
    ///
    /// Fails with [`ApiServerError::CacheSyncTimeout`] if `stop` completes first or a
    /// cache can no longer become ready. Handlers must not serve traffic before this
    /// returns `Ok`.
    pub async fn run(&self, stop: impl Future<Output = ()>) -> Result<()> {
        let synced = futures::future::join_all([
            self.pods.wait_synced(),
            self.namespaces.wait_synced(),
            self.flapps.wait_synced(),
        ]);

        tokio::select! {
            biased;
            results = synced => {
                if results.into_iter().all(|ready| ready) {
                    info!("Caches synced");
                    Ok(())
                } else {
                    Err(ApiServerError::CacheSyncTimeout)
                }
            }
            _ = stop => Err(ApiServerError::CacheSyncTimeout),
        }
    }

    pub fn list_namespaces(&self) -> Result<Envelope<Vec<Namespace>>> {
        let namespaces = self.namespaces.list(None, &Selector::default());
        Ok(wrap(envelope::NAMESPACES, owned(namespaces)))
    }

    /// Pods in `namespace`
    pub fn list_pods(&self, namespace: &str) -> Result<Envelope<Vec<Pod>>> {
        let pods = self.pods.list(Some(namespace), &Selector::default());
        Ok(wrap(envelope::PODS, owned(pods)))
    }

    pub fn get_pod(&self, namespace: &str, name: &str) -> Result<Envelope<Pod>> {
        let pod = self
            .pods
            .get(Some(namespace), name)
            .ok_or_else(|| ApiServerError::not_found("pod", name))?;
        Ok(wrap(envelope::POD, Pod::clone(&pod)))
    }

    /// Events whose involved object is named `name`
    #[instrument(skip(self))]
    pub async fn list_pod_events(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Envelope<ObjectList<Event>>> {
        let events: Api<Event> = Api::namespaced(self.client.clone(), namespace);
        let lp = ListParams::default().fields(&field_equals(fields::INVOLVED_OBJECT_NAME, name));
        let events = events.list(&lp).await?;
        debug!("Found {} events", events.items.len());
        Ok(wrap(envelope::EVENTS, events))
    }

    #[instrument(skip(self))]
    pub async fn get_flapp(&self, namespace: &str, name: &str) -> Result<Envelope<FLApp>> {
        let flapp = self.flapp_api(namespace).get(name).await?;
        let state = flapp.app_state();
        debug!("FLApp is in state {:?} (terminal: {})", state, state.is_terminal());
        Ok(wrap(envelope::FLAPP, flapp))
    }

    /// Pods labelled as belonging to the FLApp `name`
    pub fn list_flapp_pods(&self, namespace: &str, name: &str) -> Result<Envelope<Vec<Pod>>> {
        let pods = self.pods.list(Some(namespace), &job_pods(name));
        Ok(wrap(envelope::PODS, owned(pods)))
    }

    #[instrument(skip(self))]
    pub async fn list_flapps(&self, namespace: &str) -> Result<Envelope<ObjectList<FLApp>>> {
        let flapps = self.flapp_api(namespace).list(&ListParams::default()).await?;
        debug!("Found {} flapps", flapps.items.len());
        Ok(wrap(envelope::FLAPPS, flapps))
    }

    /// Create an FLApp from a JSON request body. A body that does not
    /// deserialize is reported like any other failure.
    #[instrument(skip(self, body))]
    pub async fn create_flapp(&self, namespace: &str, body: &[u8]) -> Result<Envelope<FLApp>> {
        let flapp: FLApp = serde_json::from_slice(body)?;
        let created = self
            .flapp_api(namespace)
            .create(&PostParams::default(), &flapp)
            .await?;
        info!(
            "Created flapp {}/{}",
            namespace,
            created.metadata.name.as_deref().unwrap_or_default()
        );
        Ok(wrap(envelope::FLAPP, created))
    }

    #[instrument(skip(self))]
    pub async fn delete_flapp(&self, namespace: &str, name: &str) -> Result<Envelope<()>> {
        self.flapp_api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        info!("Deleted flapp {}/{}", namespace, name);
        Ok(Json(BTreeMap::new()))
    }

    fn flapp_api(&self, namespace: &str) -> Api<FLApp> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// Selects the pods belonging to the FLApp with the given name
fn job_pods(app_name: &str) -> Selector {
    [(labels::APP_NAME.to_string(), app_name.to_string())]
        .into_iter()
        .collect()
}

/// A single-term `key=value` field selector. `\`, `,` and `=` in the value are
/// escaped so it always compares against the literal value.
fn field_equals(key: &str, value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ',' | '=') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("{}={}", key, escaped)
}

/// Copy cached objects out for serialization; the cache itself is never touched.
fn owned<K: Clone>(objects: Vec<Arc<K>>) -> Vec<K> {
    objects.iter().map(|o| K::clone(o)).collect()
}
