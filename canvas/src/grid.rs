//! Pixel grid: the single source of truth for paint state.
//!
//! The grid has fixed dimensions chosen at construction. Every accessor takes
//! signed coordinates and bounds-checks them; out-of-range reads return
//! [`Color::Transparent`] and out-of-range writes are no-ops, so malformed
//! pointer math or bad remote records can never corrupt or crash the grid.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::{GRID_COLS, GRID_ROWS};

static OUTSIDE: Color = Color::Transparent;

/// A (row, col) cell address. May lie outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i64,
    pub col: i64,
}

impl Cell {
    #[must_use]
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

/// Wire record for one painted cell: `{"row": 3, "col": 4, "color": "red"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub row: i64,
    pub col: i64,
    pub color: Color,
}

impl Pixel {
    #[must_use]
    pub fn new(row: i64, col: i64, color: Color) -> Self {
        Self { row, col, color }
    }

    #[must_use]
    pub fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

/// Row-major matrix of cell colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Color>,
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new(GRID_ROWS, GRID_COLS)
    }
}

impl PixelGrid {
    /// Create a grid with every cell transparent.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![Color::Transparent; rows * cols] }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `(row, col)` addresses a cell of this grid.
    #[must_use]
    pub fn contains(&self, row: i64, col: i64) -> bool {
        self.index(row, col).is_some()
    }

    fn index(&self, row: i64, col: i64) -> Option<usize> {
        let (Ok(r), Ok(c)) = (usize::try_from(row), usize::try_from(col)) else {
            return None;
        };
        if r < self.rows && c < self.cols { Some(r * self.cols + c) } else { None }
    }

    /// Color at `(row, col)`; transparent when out of range.
    #[must_use]
    pub fn get(&self, row: i64, col: i64) -> &Color {
        match self.index(row, col) {
            Some(i) => &self.cells[i],
            None => &OUTSIDE,
        }
    }

    /// Write `color` at `(row, col)`. Returns `false`, leaving the grid
    /// untouched, when the coordinates are out of range.
    pub fn set(&mut self, row: i64, col: i64, color: Color) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = color;
                true
            }
            None => false,
        }
    }

    /// Reset every cell to transparent.
    pub fn clear(&mut self) {
        self.cells.fill(Color::Transparent);
    }

    /// Every cell with its address, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &Color)> + '_ {
        let cols = self.cols.max(1);
        self.cells.iter().enumerate().map(move |(i, color)| {
            #[allow(clippy::cast_possible_wrap)]
            let cell = Cell::new((i / cols) as i64, (i % cols) as i64);
            (cell, color)
        })
    }

    /// Sparse list of non-transparent cells, row-major. This is exactly the
    /// set the remote store holds for this grid.
    pub fn painted(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.cells()
            .filter(|(_, color)| !color.is_transparent())
            .map(|(cell, color)| Pixel::new(cell.row, cell.col, color.clone()))
    }

    /// Number of non-transparent cells.
    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_transparent()).count()
    }
}
