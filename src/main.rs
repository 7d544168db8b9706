//! KV Proxy - An in-memory key-value server
//!
//! Serves GET/SET/UPDATE/DELETE through a caching proxy with TTL expiration
//! and periodic snapshots.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kv_proxy::server::serve;
use kv_proxy::tasks::{ExpirationSweeper, SnapshotWriter};
use kv_proxy::{
    shutdown_channel, spawn_snapshot_task, spawn_sweeper_task, CacheProxy, Config, Store,
};

/// Main entry point for the key-value server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Bind the TCP listener (fatal on failure)
/// 4. Create the store and the caching proxy in front of it
/// 5. Start the expiration sweeper and snapshot tasks, then accept connections
/// 6. On SIGINT/SIGTERM, signal every loop to stop and wait for the
///    background tasks
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kv_proxy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting KV Proxy Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: addr={}, key_ttl={}s, sweep_interval={}s, snapshot_interval={}s, snapshot_path={}",
        config.bind_addr(),
        config.key_ttl,
        config.sweep_interval,
        config.snapshot_interval,
        config.snapshot_path.display()
    );

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    let store = Arc::new(Store::new());
    let proxy = Arc::new(CacheProxy::new(store.clone()));

    let (shutdown_tx, shutdown_rx) = shutdown_channel();

    let sweeper = ExpirationSweeper::new(proxy.clone(), config.ttl());
    let sweeper_handle = spawn_sweeper_task(sweeper, config.sweep_every(), shutdown_rx.clone());

    let writer = SnapshotWriter::new(store.clone(), config.snapshot_path.clone());
    let snapshot_handle =
        spawn_snapshot_task(writer, config.snapshot_every(), shutdown_rx.clone());

    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    serve(listener, proxy.clone(), config.read_deadline(), shutdown_rx).await;

    sweeper_handle.await.context("Sweeper task panicked")?;
    snapshot_handle.await.context("Snapshot task panicked")?;

    let stats = proxy.stats().await;
    info!(
        "Server shutdown complete: hits={}, misses={}, hit_rate={:.2}, expirations={}",
        stats.hits,
        stats.misses,
        stats.hit_rate(),
        stats.expirations
    );
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
