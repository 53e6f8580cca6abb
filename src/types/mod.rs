// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types served by the API server.

pub mod flapp;

pub use flapp::{FLApp, FLAppSpec, FLAppState, FLAppStatus};
