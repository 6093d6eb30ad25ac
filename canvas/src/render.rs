//! Rendering: paints the pixel grid onto a raster surface.
//!
//! This module is the only place that writes pixels. It receives a read-only
//! view of the grid and does not mutate any application state. Every call is a
//! full repaint of the logical surface: clear, then one filled square per
//! non-transparent cell. There is no dirty-region tracking, so a repaint costs
//! O(rows × cols) and one happens after every mutation. Grids are small and
//! bounded (100 × 100), which keeps this the simplest correct approach.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::color::Color;
use crate::grid::PixelGrid;

/// A 2D drawing target in logical pixels.
pub trait Surface {
    /// Erase `(0, 0)..(width, height)` to fully transparent.
    fn clear(&mut self, width: f64, height: f64);

    /// Fill the axis-aligned rectangle with `color`.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &Color);
}

/// Logical surface size for `grid` at `cell_size_px`, as `(width, height)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn logical_size(grid: &PixelGrid, cell_size_px: f64) -> (f64, f64) {
    (grid.cols() as f64 * cell_size_px, grid.rows() as f64 * cell_size_px)
}

/// Full repaint of `grid` onto `surface`. Returns the number of cells filled.
///
/// Cell `(row, col)` covers `cell_size_px × cell_size_px` logical pixels at
/// `(col · cell_size_px, row · cell_size_px)`.
#[allow(clippy::cast_precision_loss)]
pub fn render<S: Surface + ?Sized>(surface: &mut S, grid: &PixelGrid, cell_size_px: f64) -> usize {
    let (width, height) = logical_size(grid, cell_size_px);
    surface.clear(width, height);

    let mut filled = 0;
    for (cell, color) in grid.cells() {
        if color.is_transparent() {
            continue;
        }
        surface.fill_rect(
            cell.col as f64 * cell_size_px,
            cell.row as f64 * cell_size_px,
            cell_size_px,
            cell_size_px,
            color,
        );
        filled += 1;
    }
    filled
}

/// In-memory RGBA8 raster, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Create a fully transparent framebuffer.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0; width as usize * height as usize * 4] }
    }

    /// Framebuffer sized to the grid's logical surface.
    #[must_use]
    pub fn for_grid(grid: &PixelGrid, cell_size_px: f64) -> Self {
        let (width, height) = logical_size(grid, cell_size_px);
        Self::new(to_px(width, u32::MAX), to_px(height, u32::MAX))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn fill(&mut self, x: f64, y: f64, width: f64, height: f64, rgba: [u8; 4]) {
        let x0 = to_px(x, self.width);
        let y0 = to_px(y, self.height);
        let x1 = to_px(x + width, self.width);
        let y1 = to_px(y + height, self.height);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let stride = self.width as usize * 4;
        for row in y0..y1 {
            let start = row as usize * stride + x0 as usize * 4;
            let end = row as usize * stride + x1 as usize * 4;
            for px in self.data[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }
}

/// Round a logical coordinate to a pixel index clamped to `[0, max]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(v: f64, max: u32) -> u32 {
    if v.is_nan() || v <= 0.0 {
        0
    } else {
        (v.round().min(f64::from(max))) as u32
    }
}

impl Surface for Framebuffer {
    fn clear(&mut self, width: f64, height: f64) {
        self.fill(0.0, 0.0, width, height, [0, 0, 0, 0]);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &Color) {
        // Unresolvable paint strings leave the rectangle as is.
        if let Some(rgba) = color.to_rgba() {
            self.fill(x, y, width, height, rgba);
        }
    }
}
