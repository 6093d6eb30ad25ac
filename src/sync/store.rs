//! The remote store seam.

use canvas::grid::Pixel;

use super::SyncError;

/// Remote persistence for painted pixels.
///
/// Stores hold only non-transparent cells; upserting a transparent pixel
/// removes the cell.
#[async_trait::async_trait]
pub trait PixelStore: Send + Sync {
    /// Fetch every stored pixel. An empty list means the grid is blank.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] if the store is unreachable or answers with
    /// something other than a pixel list.
    async fn fetch_all(&self) -> Result<Vec<Pixel>, SyncError>;

    /// Write one cell. Re-sending the same pixel is idempotent.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] if the write is not acknowledged.
    async fn upsert(&self, pixel: &Pixel) -> Result<(), SyncError>;

    /// Remove every stored pixel.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] if the request is not acknowledged.
    async fn clear(&self) -> Result<(), SyncError>;
}
