//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the [`Mural`], the sparse map of painted cells, behind an async
//! `RwLock`. Every effective change bumps the mural's version; the
//! persistence task records the last version it wrote, so "dirty" is simply
//! `version != flushed`.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use canvas::color::Color;
use canvas::consts::{GRID_COLS, GRID_ROWS};
use canvas::grid::{Cell, Pixel};
use tokio::sync::RwLock;

// =============================================================================
// MURAL
// =============================================================================

/// Painted cells of one grid. Transparent cells are never stored.
#[derive(Debug, Clone)]
pub struct Mural {
    rows: usize,
    cols: usize,
    pixels: BTreeMap<Cell, Color>,
    version: u64,
    flushed: u64,
}

impl Default for Mural {
    fn default() -> Self {
        Self::new(GRID_ROWS, GRID_COLS)
    }
}

impl Mural {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, pixels: BTreeMap::new(), version: 0, flushed: 0 }
    }

    /// Seed from a snapshot. Records outside the grid are dropped. The
    /// result is clean: it matches what is on disk.
    #[must_use]
    pub fn from_snapshot(rows: usize, cols: usize, pixels: impl IntoIterator<Item = Pixel>) -> Self {
        let mut mural = Self::new(rows, cols);
        for pixel in pixels {
            if mural.contains(pixel.row, pixel.col) && !pixel.color.is_transparent() {
                mural.pixels.insert(pixel.cell(), pixel.color);
            }
        }
        mural
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn contains(&self, row: i64, col: i64) -> bool {
        usize::try_from(row).is_ok_and(|r| r < self.rows) && usize::try_from(col).is_ok_and(|c| c < self.cols)
    }

    /// Every stored pixel, row-major.
    #[must_use]
    pub fn pixels(&self) -> Vec<Pixel> {
        self.pixels.iter().map(|(cell, color)| Pixel::new(cell.row, cell.col, color.clone())).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Upsert one cell; a transparent color removes it. Returns whether the
    /// stored set changed. The caller validates bounds.
    pub fn apply(&mut self, pixel: Pixel) -> bool {
        let cell = pixel.cell();
        let changed = if pixel.color.is_transparent() {
            self.pixels.remove(&cell).is_some()
        } else {
            self.pixels.insert(cell, pixel.color.clone()).as_ref() != Some(&pixel.color)
        };
        if changed {
            self.version += 1;
        }
        changed
    }

    /// Remove every cell. Returns whether anything was stored.
    pub fn clear(&mut self) -> bool {
        if self.pixels.is_empty() {
            return false;
        }
        self.pixels.clear();
        self.version += 1;
        true
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.version != self.flushed
    }

    /// Record that `version` reached disk. Older acknowledgements are ignored.
    pub fn mark_flushed(&mut self, version: u64) {
        self.flushed = self.flushed.max(version);
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state. Clone is required by Axum; the mural is
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub mural: Arc<RwLock<Mural>>,
    pub snapshot_path: Option<PathBuf>,
}

impl AppState {
    #[must_use]
    pub fn new(mural: Mural, snapshot_path: Option<PathBuf>) -> Self {
        Self { mural: Arc::new(RwLock::new(mural)), snapshot_path }
    }

    /// In-memory state for the default grid.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Mural::default(), None)
    }
}
