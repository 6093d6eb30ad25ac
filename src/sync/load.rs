//! Initial load and the guard that keeps it from clobbering early paints.

#[cfg(test)]
#[path = "load_test.rs"]
mod load_test;

use std::collections::HashSet;

use canvas::color::Color;
use canvas::grid::{Cell, Pixel, PixelGrid};
use tracing::{info, warn};

use super::SyncError;

/// How a load result was applied to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store had pixels. `skipped` counts records that fell outside the
    /// grid or landed on a cell painted during the load.
    Applied { applied: usize, skipped: usize },
    /// The store was empty; the grid was cleared.
    Cleared,
    /// The store could not be read; the grid was left as is.
    Failed(SyncError),
}

/// Remembers cells painted locally while the initial load is in flight.
#[derive(Debug, Clone, Default)]
pub struct LoadGuard {
    active: bool,
    touched: HashSet<Cell>,
}

impl LoadGuard {
    pub fn begin(&mut self) {
        self.active = true;
        self.touched.clear();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Record a local paint. Ignored once the load has resolved.
    pub fn record_paint(&mut self, cell: Cell) {
        if self.active {
            self.touched.insert(cell);
        }
    }

    #[must_use]
    pub fn protects(&self, cell: Cell) -> bool {
        self.active && self.touched.contains(&cell)
    }

    /// Apply `result` to `grid` and disarm the guard.
    ///
    /// Local paints made during the load always survive: loaded records for
    /// those cells are skipped, and an empty load clears only the others.
    pub fn resolve(&mut self, grid: &mut PixelGrid, result: Result<Vec<Pixel>, SyncError>) -> LoadOutcome {
        let outcome = match result {
            Err(error) => {
                warn!(%error, "initial load failed; keeping local grid");
                LoadOutcome::Failed(error)
            }
            Ok(pixels) if pixels.is_empty() => {
                self.clear_untouched(grid);
                info!(protected = self.touched.len(), "store empty; grid cleared");
                LoadOutcome::Cleared
            }
            Ok(pixels) => {
                let mut applied = 0;
                let mut skipped = 0;
                for pixel in pixels {
                    if !self.protects(pixel.cell()) && grid.set(pixel.row, pixel.col, pixel.color) {
                        applied += 1;
                    } else {
                        skipped += 1;
                    }
                }
                info!(applied, skipped, "initial load applied");
                LoadOutcome::Applied { applied, skipped }
            }
        };
        self.active = false;
        self.touched.clear();
        outcome
    }

    fn clear_untouched(&self, grid: &mut PixelGrid) {
        if self.touched.is_empty() {
            grid.clear();
            return;
        }
        let stale: Vec<Cell> = grid.painted().map(|p| p.cell()).filter(|c| !self.touched.contains(c)).collect();
        for cell in stale {
            grid.set(cell.row, cell.col, Color::Transparent);
        }
    }
}
