// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::envelope;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiServerError {
    #[error(transparent)]
    KubeError(#[from] kube::Error),

    #[error("{kind} \"{name}\" not found")]
    NotFound { kind: &'static str, name: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("timed out waiting for cache to sync")]
    CacheSyncTimeout,
}

impl ApiServerError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::KubeError(kube::Error::Api(err)) => err.code == 404,
            _ => false,
        }
    }

    /// Status code reported to HTTP callers: 404 for missing objects, 500 otherwise
    pub fn status_code(&self) -> StatusCode {
        if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Error text as returned by the API server, without the client's wrapping
    pub fn message(&self) -> String {
        match self {
            Self::KubeError(kube::Error::Api(err)) => err.message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Request failed: {}", self);
        } else {
            tracing::error!("Request failed: {}", self);
        }
        let body = BTreeMap::from([(envelope::ERROR, self.message())]);
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiServerError>;
