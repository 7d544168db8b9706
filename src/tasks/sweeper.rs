//! TTL Expiration Sweeper
//!
//! Background task that periodically removes expired keys from the store and
//! the proxy's cache in one locked pass.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::kv::CacheProxy;
use crate::tasks::{next_cycle, Shutdown};

// == Expiration Sweeper ==
/// Removes keys whose last write is older than a fixed TTL.
#[derive(Debug, Clone)]
pub struct ExpirationSweeper {
    proxy: Arc<CacheProxy>,
    ttl: Duration,
}

impl ExpirationSweeper {
    pub fn new(proxy: Arc<CacheProxy>, ttl: Duration) -> Self {
        Self { proxy, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Runs one sweep against the current wall-clock time.
    ///
    /// Returns the number of keys removed.
    pub async fn sweep(&self) -> usize {
        self.sweep_at(Utc::now()).await
    }

    /// Runs one sweep as if the current time were `now`.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        self.proxy.purge_expired(now, self.ttl).await
    }
}

/// Spawns a background task that sweeps expired keys every `interval`.
///
/// The task stops after the shutdown signal fires; the returned JoinHandle
/// completes once it has.
///
/// # Example
/// ```ignore
/// let (shutdown_tx, shutdown_rx) = shutdown_channel();
/// let sweeper = ExpirationSweeper::new(proxy.clone(), Duration::from_secs(15));
/// let handle = spawn_sweeper_task(sweeper, Duration::from_secs(2), shutdown_rx);
/// // Later, during shutdown:
/// shutdown_tx.send(true).ok();
/// handle.await.ok();
/// ```
pub fn spawn_sweeper_task(
    sweeper: ExpirationSweeper,
    interval: Duration,
    mut shutdown: Shutdown,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting expiration sweeper: ttl={:?}, interval={:?}",
            sweeper.ttl(),
            interval
        );

        while next_cycle(interval, &mut shutdown).await {
            let removed = sweeper.sweep().await;

            if removed > 0 {
                info!("Expiration sweep: removed {} expired keys", removed);
            } else {
                debug!("Expiration sweep: no expired keys found");
            }
        }

        info!("Expiration sweeper stopped");
    })
}
