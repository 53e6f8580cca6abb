// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen_address: SocketAddr,
    /// How long startup waits for the caches to sync before giving up
    pub cache_sync_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let listen_address = lookup("LISTEN_ADDRESS")
            .unwrap_or_else(|| defaults::LISTEN_ADDRESS.to_string())
            .parse()
            .context("LISTEN_ADDRESS is not a valid socket address")?;

        let cache_sync_timeout = match lookup("CACHE_SYNC_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse()
                .context("CACHE_SYNC_TIMEOUT_SECS is not a whole number of seconds")?,
            None => defaults::CACHE_SYNC_TIMEOUT_SECS,
        };

        Ok(Config {
            listen_address,
            cache_sync_timeout: Duration::from_secs(cache_sync_timeout),
        })
    }
}
