// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP routes dispatching to the [`Handler`].

use crate::error::Result;
use crate::handler::{Envelope, Handler};
use crate::types::flapp::FLApp;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use bytes::Bytes;
use k8s_openapi::api::core::v1::{Event, Namespace, Pod};
use kube::api::ObjectList;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const FLAPPS: &str = "/api/v1/namespaces/{namespace}/fedlearner/v1alpha1/flapps";
const FLAPP: &str = "/api/v1/namespaces/{namespace}/fedlearner/v1alpha1/flapps/{name}";
const FLAPP_PODS: &str = "/api/v1/namespaces/{namespace}/fedlearner/v1alpha1/flapps/{name}/pods";

type SharedHandler = State<Arc<Handler>>;

pub fn router(handler: Arc<Handler>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/v1/namespaces", get(list_namespaces))
        .route("/api/v1/namespaces/{namespace}/pods", get(list_pods))
        .route("/api/v1/namespaces/{namespace}/pods/{name}", get(get_pod))
        .route(
            "/api/v1/namespaces/{namespace}/pods/{name}/events",
            get(list_pod_events),
        )
        .route(FLAPPS, get(list_flapps).post(create_flapp))
        .route(FLAPP, get(get_flapp).delete(delete_flapp))
        .route(FLAPP_PODS, get(list_flapp_pods))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

async fn healthz() -> Envelope<()> {
    Json(BTreeMap::new())
}

async fn list_namespaces(State(handler): SharedHandler) -> Result<Envelope<Vec<Namespace>>> {
    handler.list_namespaces()
}

async fn list_pods(
    State(handler): SharedHandler,
    Path(namespace): Path<String>,
) -> Result<Envelope<Vec<Pod>>> {
    handler.list_pods(&namespace)
}

async fn get_pod(
    State(handler): SharedHandler,
    Path((namespace, name)): Path<(String, String)>,
) -> Result<Envelope<Pod>> {
    handler.get_pod(&namespace, &name)
}

async fn list_pod_events(
    State(handler): SharedHandler,
    Path((namespace, name)): Path<(String, String)>,
) -> Result<Envelope<ObjectList<Event>>> {
    handler.list_pod_events(&namespace, &name).await
}

async fn list_flapps(
    State(handler): SharedHandler,
    Path(namespace): Path<String>,
) -> Result<Envelope<ObjectList<FLApp>>> {
    handler.list_flapps(&namespace).await
}

async fn create_flapp(
    State(handler): SharedHandler,
    Path(namespace): Path<String>,
    body: Bytes,
) -> Result<Envelope<FLApp>> {
    handler.create_flapp(&namespace, &body).await
}

async fn get_flapp(
    State(handler): SharedHandler,
    Path((namespace, name)): Path<(String, String)>,
) -> Result<Envelope<FLApp>> {
    handler.get_flapp(&namespace, &name).await
}

async fn delete_flapp(
    State(handler): SharedHandler,
    Path((namespace, name)): Path<(String, String)>,
) -> Result<Envelope<()>> {
    handler.delete_flapp(&namespace, &name).await
}

async fn list_flapp_pods(
    State(handler): SharedHandler,
    Path((namespace, name)): Path<(String, String)>,
) -> Result<Envelope<Vec<Pod>>> {
    handler.list_flapp_pods(&namespace, &name)
}
