//! Snapshot Task
//!
//! Background task that periodically writes the store's contents to disk.
//! Each snapshot is written to a uniquely named sibling temp file, synced,
//! then renamed over the destination, so readers only ever see a complete
//! document even when several writers race.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::kv::Store;
use crate::tasks::{next_cycle, Shutdown};

/// Describes a snapshot that was written successfully.
#[derive(Debug, Clone)]
pub struct SnapshotHandle {
    /// Where the snapshot now lives
    pub path: PathBuf,
    /// Number of keys captured
    pub entries: usize,
    /// Size of the written document
    pub bytes: usize,
    /// Capture time
    pub taken_at: DateTime<Utc>,
}

// == Snapshot Writer ==
/// Captures the store and atomically replaces the snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    store: Arc<Store>,
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(store: Arc<Store>, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes one snapshot, replacing whatever was at the destination.
    ///
    /// On failure the destination is left untouched and the temp file is
    /// removed.
    pub async fn snapshot(&self) -> Result<SnapshotHandle> {
        let taken_at = Utc::now();
        let snapshot = self.store.snapshot().await;
        let bytes = snapshot.to_json()?;

        let written = bytes.len();

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_atomically(&path, &bytes))
            .await
            .map_err(std::io::Error::other)??;

        Ok(SnapshotHandle {
            path: self.path.clone(),
            entries: snapshot.len(),
            bytes: written,
            taken_at,
        })
    }
}

/// Writes `bytes` to a fresh temp file next to `path`, syncs it, and renames
/// it into place. The temp file is deleted if any step fails.
fn replace_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    // Same directory, so the rename stays on one filesystem
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Spawns a background task that writes a snapshot every `interval`.
///
/// A failed cycle is logged and skipped; only the shutdown signal ends the
/// task.
pub fn spawn_snapshot_task(
    writer: SnapshotWriter,
    interval: Duration,
    mut shutdown: Shutdown,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting snapshot task: path={}, interval={:?}",
            writer.path().display(),
            interval
        );

        while next_cycle(interval, &mut shutdown).await {
            match writer.snapshot().await {
                Ok(handle) => debug!(
                    "Snapshot written: {} keys, {} bytes to {}",
                    handle.entries,
                    handle.bytes,
                    handle.path.display()
                ),
                Err(e) => warn!("Snapshot failed, will retry next cycle: {}", e),
            }
        }

        info!("Snapshot task stopped");
    })
}
