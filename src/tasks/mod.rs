//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiration sweep: removes keys older than the TTL from store and cache
//! - Snapshot: writes the store's contents to disk at a fixed interval
//!
//! Both loops watch a shared shutdown signal between cycles.

mod snapshot;
mod sweeper;

use std::time::Duration;

use tokio::sync::watch;

pub use snapshot::{spawn_snapshot_task, SnapshotHandle, SnapshotWriter};
pub use sweeper::{spawn_sweeper_task, ExpirationSweeper};

/// Receiving half of the shutdown signal.
pub type Shutdown = watch::Receiver<bool>;

/// Creates a shutdown signal. Send `true` to stop every task holding a receiver.
pub fn shutdown_channel() -> (watch::Sender<bool>, Shutdown) {
    watch::channel(false)
}

/// Sleeps for `period`, returning false instead if shutdown is requested first.
///
/// A dropped sender counts as a shutdown request.
pub(crate) async fn next_cycle(period: Duration, shutdown: &mut Shutdown) -> bool {
    if *shutdown.borrow() {
        return false;
    }
    tokio::select! {
        _ = tokio::time::sleep(period) => true,
        _ = shutdown.changed() => false,
    }
}
