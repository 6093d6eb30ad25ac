//! Shared numeric constants for the canvas crate.

// ── Grid geometry ───────────────────────────────────────────────

/// Number of rows in the pixel grid.
pub const GRID_ROWS: usize = 100;

/// Number of columns in the pixel grid.
pub const GRID_COLS: usize = 100;

/// Logical pixels per cell edge. The logical surface is `GRID_COLS * CELL_SIZE_PX` wide.
pub const CELL_SIZE_PX: f64 = 20.0;

// ── Zoom ────────────────────────────────────────────────────────

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;
pub const ZOOM_DEFAULT: f64 = 1.0;

// ── Edge-autoscroll ─────────────────────────────────────────────

/// Distance from a window edge, in client pixels, that triggers an autoscroll.
pub const EDGE_SCROLL_THRESHOLD_PX: f64 = 20.0;

/// Number of linear interpolation steps per autoscroll.
pub const EDGE_SCROLL_STEPS: u32 = 20;
