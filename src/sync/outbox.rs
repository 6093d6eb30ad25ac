//! Outbox: ordered, fire-and-forget persistence of painted pixels.
//!
//! DESIGN
//! ======
//! Paints are pushed onto an unbounded queue and a single worker task drains
//! it, one `upsert` at a time. One worker means writes reach the store in
//! paint order, so the last paint of a cell is the one that sticks. Painting
//! never waits on the network.
//!
//! ERROR HANDLING
//! ==============
//! A failed write is logged and reported as [`SyncEvent::Failed`]. Nothing is
//! retried; the local grid keeps the paint regardless.

#[cfg(test)]
#[path = "outbox_test.rs"]
mod outbox_test;

use std::collections::HashMap;
use std::sync::Arc;

use canvas::grid::{Cell, Pixel};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::{PixelStore, SyncError};

/// Completion report for one queued write.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Persisted(Pixel),
    Failed { pixel: Pixel, error: SyncError },
}

impl SyncEvent {
    #[must_use]
    pub fn pixel(&self) -> &Pixel {
        match self {
            Self::Persisted(pixel) | Self::Failed { pixel, .. } => pixel,
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Queue plus the worker draining it.
pub struct Outbox {
    tx: mpsc::UnboundedSender<Pixel>,
    worker: JoinHandle<()>,
}

impl Outbox {
    /// Spawn the worker on the current runtime.
    pub fn spawn(store: Arc<dyn PixelStore>) -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<Pixel>();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let worker = tokio::spawn(async move {
            while let Some(pixel) = rx.recv().await {
                let event = match store.upsert(&pixel).await {
                    Ok(()) => {
                        debug!(row = pixel.row, col = pixel.col, color = %pixel.color, "pixel persisted");
                        SyncEvent::Persisted(pixel)
                    }
                    Err(error) => {
                        error!(%error, row = pixel.row, col = pixel.col, color = %pixel.color, "pixel persist failed");
                        SyncEvent::Failed { pixel, error }
                    }
                };
                if events_tx.send(event).is_err() {
                    debug!("sync event receiver dropped; continuing without reports");
                }
            }
        });

        (Self { tx, worker }, events_rx)
    }

    /// Queue `pixel`. Returns `false` if the worker has stopped.
    pub fn enqueue(&self, pixel: Pixel) -> bool {
        self.tx.send(pixel).is_ok()
    }

    /// Close the queue and wait for the worker to drain what is left.
    pub async fn shutdown(self) {
        let Self { tx, worker } = self;
        drop(tx);
        if let Err(e) = worker.await {
            warn!(error = %e, "outbox worker ended abnormally");
        }
    }
}

/// Per-cell count of writes queued but not yet settled.
#[derive(Debug, Clone, Default)]
pub struct PendingWrites {
    cells: HashMap<Cell, usize>,
}

impl PendingWrites {
    pub fn begin(&mut self, cell: Cell) {
        *self.cells.entry(cell).or_insert(0) += 1;
    }

    pub fn finish(&mut self, cell: Cell) {
        if let Some(count) = self.cells.get_mut(&cell) {
            *count -= 1;
            if *count == 0 {
                self.cells.remove(&cell);
            }
        }
    }

    #[must_use]
    pub fn is_pending(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Number of distinct cells with writes in flight.
    #[must_use]
    pub fn cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of writes in flight.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cells.values().sum()
    }
}
