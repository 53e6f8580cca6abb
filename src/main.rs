// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fedlearner_apiserver::config::Config;
use fedlearner_apiserver::handler::Handler;
use fedlearner_apiserver::kubernetes::Informers;
use fedlearner_apiserver::routes::router;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG controls the level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting FLApp API server");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: listen_address={}, cache_sync_timeout={:?}",
        config.listen_address, config.cache_sync_timeout
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let informers = Informers::start(&client);
    let handler = Handler::from_informers(client, informers);

    // Nothing is served until the caches reflect the cluster
    info!("Waiting for caches to sync...");
    handler
        .run(tokio::time::sleep(config.cache_sync_timeout))
        .await?;

    let listener = tokio::net::TcpListener::bind(config.listen_address).await?;
    info!("Listening on {}", config.listen_address);

    axum::serve(listener, router(Arc::new(handler)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
