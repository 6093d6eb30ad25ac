//! Snapshot persistence: background flush of the mural to a JSON file.
//!
//! DESIGN
//! ======
//! A background task wakes every `FLUSH_INTERVAL_MS` and writes the whole
//! mural when its version has moved past the last flushed one. The pixel
//! list is copied under the read lock and written without holding it, so
//! request handlers never wait on disk I/O. Shutdown is cooperative: the
//! task finishes any flush in progress before it exits, so the final flush
//! never races a periodic one on the temp file.
//!
//! ERROR HANDLING
//! ==============
//! The dirty state is cleared only after a successful write. A failed flush
//! is logged and retried on the next tick. Writes go to a sibling temp file
//! first and are renamed into place, so a crash never leaves a torn snapshot.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use canvas::grid::Pixel;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::error::StoreError;
use crate::state::AppState;

pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 500;

/// Read a snapshot file. A missing file is an empty mural.
///
/// # Errors
///
/// Returns [`StoreError`] if the file exists but cannot be read or parsed.
pub async fn load_snapshot(path: &Path) -> Result<Vec<Pixel>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Atomically replace the snapshot at `path`.
///
/// # Errors
///
/// Returns [`StoreError`] if the temp file cannot be written or renamed.
pub async fn write_snapshot(path: &Path, pixels: &[Pixel]) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(pixels)?;
    let tmp = temp_path(path);
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the mural if it changed since the last flush. Returns whether a
/// snapshot was written. Without a snapshot path this is a no-op.
///
/// # Errors
///
/// Returns [`StoreError`] if the write fails; the mural stays dirty.
pub async fn flush_if_dirty(state: &AppState) -> Result<bool, StoreError> {
    let Some(path) = state.snapshot_path.as_deref() else {
        return Ok(false);
    };

    let (version, pixels) = {
        let mural = state.mural.read().await;
        if !mural.is_dirty() {
            return Ok(false);
        }
        (mural.version(), mural.pixels())
    };

    write_snapshot(path, &pixels).await?;
    state.mural.write().await.mark_flushed(version);
    debug!(version, count = pixels.len(), path = %path.display(), "snapshot flushed");
    Ok(true)
}

/// Handle to the running flush task.
pub struct PersistenceTask {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PersistenceTask {
    /// Ask the task to stop and wait until it has. A flush already in
    /// progress completes first.
    pub async fn shutdown(self) {
        let Self { stop, handle } = self;
        if stop.send(true).is_err() {
            debug!("flush task already gone");
        }
        if let Err(e) = handle.await {
            error!(error = %e, "flush task ended abnormally");
        }
    }
}

/// Spawn the background flush task.
pub fn spawn_persistence_task(state: AppState, flush_interval_ms: u64) -> PersistenceTask {
    info!(flush_interval_ms, "snapshot flush configured");
    let (stop, mut stopped) = watch::channel(false);
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(flush_interval_ms.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = flush_if_dirty(&state).await {
                        error!(error = %e, "snapshot flush failed");
                    }
                }
                _ = stopped.changed() => break,
            }
        }
        debug!("flush task stopped");
    });
    PersistenceTask { stop, handle }
}
