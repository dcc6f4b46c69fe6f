//! pool-watch application library

pub mod notifier;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use pool_api::{start_server, AppState};
use pool_client::PoolClient;
use pool_core::AppConfig;
use withdrawal_locks::LockWatcher;

/// Initialize logging from `RUST_LOG`, defaulting to debug for this crate.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pool_watch=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();
    Ok(())
}

/// Run the watcher and its API server until Ctrl-C.
pub async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path).context("loading configuration")?;

    tracing::info!(
        backend = %config.backend.url,
        api_port = config.api_port,
        signed_in = config.token.is_some(),
        "Starting pool-watch"
    );

    let client = PoolClient::new(config.backend.clone()).context("creating backend client")?;
    let (watcher, watcher_task) = LockWatcher::new(Arc::new(client), config.watcher.clone())
        .with_token(config.token.clone())
        .spawn();

    let notifier = tokio::spawn(notifier::run(watcher.subscribe()));

    let state = AppState::new(config.clone(), watcher.clone());
    let served = start_server(state, config.api_port, shutdown_signal()).await;

    // Server is down; stop the countdown so nothing ticks after exit
    if watcher.shutdown().is_err() {
        tracing::debug!("Lock watcher already stopped");
    }
    watcher_task.await.context("lock watcher task failed")?;
    notifier.await.context("notifier task failed")?;

    served.context("API server failed")?;
    tracing::info!("pool-watch stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
