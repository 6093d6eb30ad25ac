//! Sync: keeps the local grid and the remote pixel store in step.
//!
//! DESIGN
//! ======
//! The remote store is reached through the [`PixelStore`] trait so the
//! session can be driven against an in-memory fake as easily as against
//! [`HttpPixelStore`]. Loading happens once at startup and is fenced by a
//! [`LoadGuard`] so that paints made while the load is in flight win over
//! the loaded data. Persistence goes through an [`Outbox`]: every paint is
//! queued and a single worker pushes the queue to the store in order.
//!
//! ERROR HANDLING
//! ==============
//! Network failures are logged and reported as [`SyncEvent::Failed`]; they
//! never roll back local state and are never retried. The local grid is
//! authoritative.

pub mod http;
pub mod load;
pub mod outbox;
pub mod store;

use std::sync::Arc;

use canvas::grid::{Pixel, PixelGrid};
use tokio::sync::mpsc;
use tracing::{debug, error};

pub use http::HttpPixelStore;
pub use load::{LoadGuard, LoadOutcome};
pub use outbox::{Outbox, PendingWrites, SyncEvent};
pub use store::PixelStore;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors from talking to the remote store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The configured base URL is not an absolute http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// The HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
    /// The request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Request(String),
    /// The store answered with a non-success status.
    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body was not a pixel list.
    #[error("malformed response: {0}")]
    Decode(String),
}

// =============================================================================
// CLIENT
// =============================================================================

/// Load and persist pixels against one store.
///
/// Owns the outbox and the bookkeeping around it (pending writes, the load
/// guard); the caller owns the grid and applies results to it.
pub struct SyncClient {
    store: Arc<dyn PixelStore>,
    outbox: Outbox,
    pending: PendingWrites,
    guard: LoadGuard,
}

impl SyncClient {
    /// Start the outbox worker. Completions arrive on the returned receiver
    /// and should be passed back through [`SyncClient::complete`].
    pub fn new(store: Arc<dyn PixelStore>) -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (outbox, events) = Outbox::spawn(Arc::clone(&store));
        let client = Self { store, outbox, pending: PendingWrites::default(), guard: LoadGuard::default() };
        (client, events)
    }

    /// Shared handle to the store, for running the initial load.
    #[must_use]
    pub fn store(&self) -> Arc<dyn PixelStore> {
        Arc::clone(&self.store)
    }

    /// Mark the initial load as in flight. Paints from now until
    /// [`SyncClient::resolve_load`] are protected from the load result.
    pub fn begin_load(&mut self) {
        self.guard.begin();
    }

    /// Apply the initial load result to `grid`.
    pub fn resolve_load(
        &mut self,
        grid: &mut PixelGrid,
        result: Result<Vec<Pixel>, SyncError>,
    ) -> LoadOutcome {
        self.guard.resolve(grid, result)
    }

    /// Queue a paint for the remote store. Fire-and-forget: the outcome
    /// arrives later as a [`SyncEvent`].
    pub fn persist(&mut self, pixel: Pixel) {
        let cell = pixel.cell();
        self.guard.record_paint(cell);
        if self.outbox.enqueue(pixel) {
            self.pending.begin(cell);
        } else {
            error!(row = cell.row, col = cell.col, "outbox closed; pixel not persisted");
        }
    }

    /// Fold a completion from the outbox into the pending-write counts.
    pub fn complete(&mut self, event: &SyncEvent) {
        let cell = event.pixel().cell();
        self.pending.finish(cell);
        debug!(row = cell.row, col = cell.col, pending = self.pending.total(), "write settled");
    }

    #[must_use]
    pub fn pending(&self) -> &PendingWrites {
        &self.pending
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.guard.is_active()
    }

    /// Stop accepting paints and wait for queued writes to finish.
    pub async fn shutdown(self) {
        self.outbox.shutdown().await;
    }
}
