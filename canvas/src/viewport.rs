//! Viewport: zoom/scroll state and the screen → cell transform.
//!
//! The rendered surface is shown at a visual scale (`zoom`) on top of whatever
//! scale its layout already applies (logical size vs. displayed size), and it
//! sits inside a scrollable page. [`ViewportTransform::screen_to_cell`] folds
//! all three (layout ratio, zoom, scroll) into one mapping. Hosts must use
//! the same `zoom` for presentation, otherwise painting drifts away from the
//! cursor.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CELL_SIZE_PX, GRID_COLS, GRID_ROWS, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::grid::{Cell, PixelGrid};
use crate::render::logical_size;

/// A point in client, page, or logical space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative, or NaN.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Where the visual zoom is anchored on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomAnchor {
    /// Scale about the surface center.
    #[default]
    Center,
    /// Scale about the surface top-left corner.
    TopLeft,
}

impl ZoomAnchor {
    fn factor(self) -> f64 {
        match self {
            Self::Center => 0.5,
            Self::TopLeft => 0.0,
        }
    }
}

/// The surface's untransformed layout box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    /// Top-left of the box in page coordinates.
    pub origin: Point,
    /// Displayed (CSS) size before zoom. May differ from the logical size.
    pub displayed: Size,
}

/// Snap `zoom` to the step grid and clamp it into the allowed range.
#[must_use]
pub fn snap_zoom(zoom: f64) -> f64 {
    let per_unit = (1.0 / ZOOM_STEP).round();
    ((zoom * per_unit).round() / per_unit).clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Zoom and scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    zoom: f64,
    scroll: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self { zoom: ZOOM_DEFAULT, scroll: Point::default() }
    }
}

impl ViewportState {
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Page scroll offset.
    #[must_use]
    pub fn scroll(&self) -> Point {
        self.scroll
    }

    /// Set zoom (snapped and clamped). Returns whether it changed.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let next = snap_zoom(zoom);
        let changed = (next - self.zoom).abs() > f64::EPSILON;
        self.zoom = next;
        changed
    }

    /// Adjust zoom by `ticks` steps of [`ZOOM_STEP`]. Returns whether it changed.
    pub fn zoom_by(&mut self, ticks: i32) -> bool {
        self.set_zoom(self.zoom + f64::from(ticks) * ZOOM_STEP)
    }
}

/// Maps client-space pointer positions to grid cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub state: ViewportState,
    pub layout: SurfaceLayout,
    /// Logical surface size (`cols · cell_size`, `rows · cell_size`).
    pub logical: Size,
    /// Client window size; zero until the host reports it.
    pub window: Size,
    pub cell_size: f64,
    pub anchor: ZoomAnchor,
}

impl Default for ViewportTransform {
    #[allow(clippy::cast_precision_loss)]
    fn default() -> Self {
        let logical = Size::new(GRID_COLS as f64 * CELL_SIZE_PX, GRID_ROWS as f64 * CELL_SIZE_PX);
        Self::new(logical, CELL_SIZE_PX)
    }
}

impl ViewportTransform {
    /// A transform whose surface is laid out at the page origin, displayed at
    /// its logical size.
    #[must_use]
    pub fn new(logical: Size, cell_size: f64) -> Self {
        Self {
            state: ViewportState::default(),
            layout: SurfaceLayout { origin: Point::default(), displayed: logical },
            logical,
            window: Size::default(),
            cell_size,
            anchor: ZoomAnchor::default(),
        }
    }

    #[must_use]
    pub fn for_grid(grid: &PixelGrid, cell_size: f64) -> Self {
        let (width, height) = logical_size(grid, cell_size);
        Self::new(Size::new(width, height), cell_size)
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.state.zoom()
    }

    /// Client pixels per logical pixel on each axis: layout ratio × zoom.
    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        let zoom = self.state.zoom();
        (
            self.layout.displayed.width / self.logical.width * zoom,
            self.layout.displayed.height / self.logical.height * zoom,
        )
    }

    /// Client-space position of the surface's visual top-left corner.
    #[must_use]
    pub fn visual_origin(&self) -> Point {
        let shrink = (1.0 - self.state.zoom()) * self.anchor.factor();
        let scroll = self.state.scroll();
        Point::new(
            self.layout.origin.x - scroll.x + self.layout.displayed.width * shrink,
            self.layout.origin.y - scroll.y + self.layout.displayed.height * shrink,
        )
    }

    /// CSS `transform` presenting the current zoom.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("scale({})", self.state.zoom())
    }

    #[must_use]
    pub fn css_transform_origin(&self) -> &'static str {
        match self.anchor {
            ZoomAnchor::Center => "center center",
            ZoomAnchor::TopLeft => "0 0",
        }
    }

    /// Client point → logical surface point.
    #[must_use]
    pub fn screen_to_logical(&self, pointer: Point) -> Point {
        let origin = self.visual_origin();
        let (sx, sy) = self.scale();
        Point::new((pointer.x - origin.x) / sx, (pointer.y - origin.y) / sy)
    }

    /// Client point → grid cell under it. The result may lie outside the grid;
    /// the grid rejects such cells.
    #[must_use]
    pub fn screen_to_cell(&self, pointer: Point) -> Cell {
        let logical = self.screen_to_logical(pointer);
        Cell::new(floor_index(logical.y / self.cell_size), floor_index(logical.x / self.cell_size))
    }

    /// Client position of `cell`'s top-left corner.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_to_screen(&self, cell: Cell) -> Point {
        let origin = self.visual_origin();
        let (sx, sy) = self.scale();
        Point::new(
            origin.x + cell.col as f64 * self.cell_size * sx,
            origin.y + cell.row as f64 * self.cell_size * sy,
        )
    }

    /// Largest scroll offset per axis: the page extent (layout box or zoomed
    /// surface, whichever reaches further) minus the window.
    #[must_use]
    pub fn max_scroll(&self) -> Point {
        let zoom = self.state.zoom();
        let shrink = (1.0 - zoom) * self.anchor.factor();
        let extent = |origin: f64, displayed: f64| {
            let layout_end = origin + displayed;
            let visual_end = origin + displayed * shrink + displayed * zoom;
            layout_end.max(visual_end)
        };
        Point::new(
            (extent(self.layout.origin.x, self.layout.displayed.width) - self.window.width).max(0.0),
            (extent(self.layout.origin.y, self.layout.displayed.height) - self.window.height).max(0.0),
        )
    }

    /// Scroll to `target`, clamped to `[0, max_scroll]`. Returns whether the
    /// offset changed.
    pub fn scroll_to(&mut self, target: Point) -> bool {
        let max = self.max_scroll();
        let next = Point::new(clamp_axis(target.x, max.x), clamp_axis(target.y, max.y));
        let changed = next != self.state.scroll;
        self.state.scroll = next;
        changed
    }

    /// Scroll by a relative offset, clamped.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> bool {
        let current = self.state.scroll();
        self.scroll_to(Point::new(current.x + dx, current.y + dy))
    }

    /// One-cell scroll vector when `pointer` lies within `threshold` client
    /// pixels of a window edge; `None` otherwise or while the window size is
    /// unknown.
    #[must_use]
    pub fn edge_scroll_delta(&self, pointer: Point, threshold: f64) -> Option<Point> {
        if self.window.is_empty() {
            return None;
        }
        let axis = |pos: f64, extent: f64| {
            if pos < threshold {
                -self.cell_size
            } else if pos > extent - threshold {
                self.cell_size
            } else {
                0.0
            }
        };
        let delta = Point::new(axis(pointer.x, self.window.width), axis(pointer.y, self.window.height));
        if delta == Point::default() { None } else { Some(delta) }
    }
}

fn clamp_axis(v: f64, max: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, max) }
}

/// Floor to a cell index. Non-finite input maps far outside any grid.
#[allow(clippy::cast_possible_truncation)]
fn floor_index(v: f64) -> i64 {
    if v.is_finite() { v.floor() as i64 } else { i64::MIN }
}

/// Linear, easing-free smooth scroll split into a fixed number of steps.
///
/// Yields per-step scroll increments rather than absolute positions, so a pan
/// performed mid-animation is preserved. The increments telescope, so they
/// add up to the requested delta.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    delta: Point,
    steps: u32,
    taken: u32,
}

impl ScrollAnimation {
    #[must_use]
    pub fn new(delta: Point, steps: u32) -> Self {
        Self { delta, steps: steps.max(1), taken: 0 }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.taken >= self.steps
    }

    fn progress(&self, k: u32) -> Point {
        let t = f64::from(k) / f64::from(self.steps);
        Point::new(self.delta.x * t, self.delta.y * t)
    }
}

impl Iterator for ScrollAnimation {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.is_finished() {
            return None;
        }
        let before = self.progress(self.taken);
        self.taken += 1;
        let after = self.progress(self.taken);
        Some(Point::new(after.x - before.x, after.y - before.y))
    }
}
