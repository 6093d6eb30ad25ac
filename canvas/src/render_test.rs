#![allow(clippy::float_cmp)]

use super::*;

/// Records every call so repaint behaviour can be asserted without a raster.
#[derive(Default)]
struct Recorder {
    clears: Vec<(f64, f64)>,
    fills: Vec<(f64, f64, f64, f64, Color)>,
}

impl Surface for Recorder {
    fn clear(&mut self, width: f64, height: f64) {
        self.clears.push((width, height));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &Color) {
        self.fills.push((x, y, width, height, color.clone()));
    }
}

#[test]
fn logical_size_is_cols_by_rows() {
    let grid = PixelGrid::new(10, 30);
    assert_eq!(logical_size(&grid, 20.0), (600.0, 200.0));
}

#[test]
fn empty_grid_clears_and_fills_nothing() {
    let mut surface = Recorder::default();
    let filled = render(&mut surface, &PixelGrid::default(), 20.0);
    assert_eq!(filled, 0);
    assert_eq!(surface.clears, vec![(2000.0, 2000.0)]);
    assert!(surface.fills.is_empty());
}

#[test]
fn fills_each_painted_cell_at_its_offset() {
    let mut grid = PixelGrid::default();
    grid.set(3, 4, Color::from("red"));
    grid.set(0, 99, Color::from("blue"));
    let mut surface = Recorder::default();
    assert_eq!(render(&mut surface, &grid, 20.0), 2);
    assert_eq!(
        surface.fills,
        vec![
            (1980.0, 0.0, 20.0, 20.0, Color::from("blue")),
            (80.0, 60.0, 20.0, 20.0, Color::from("red")),
        ]
    );
}

#[test]
fn every_render_is_a_full_repaint() {
    let mut grid = PixelGrid::default();
    grid.set(1, 1, Color::from("red"));
    let mut surface = Recorder::default();
    render(&mut surface, &grid, 20.0);
    render(&mut surface, &grid, 20.0);
    assert_eq!(surface.clears.len(), 2);
    assert_eq!(surface.fills.len(), 2);
}

// =============================================================
// Framebuffer
// =============================================================

#[test]
fn framebuffer_for_grid_matches_logical_size() {
    let fb = Framebuffer::for_grid(&PixelGrid::new(4, 5), 20.0);
    assert_eq!((fb.width(), fb.height()), (100, 80));
    assert_eq!(fb.as_bytes().len(), 100 * 80 * 4);
}

#[test]
fn framebuffer_renders_painted_cells() {
    let mut grid = PixelGrid::new(2, 2);
    grid.set(1, 0, Color::from("#ff0000"));
    let mut fb = Framebuffer::for_grid(&grid, 10.0);
    render(&mut fb, &grid, 10.0);
    assert_eq!(fb.pixel(0, 10), Some([255, 0, 0, 255]));
    assert_eq!(fb.pixel(9, 19), Some([255, 0, 0, 255]));
    assert_eq!(fb.pixel(10, 10), Some([0, 0, 0, 0]));
    assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(fb.pixel(20, 0), None);
}

#[test]
fn framebuffer_rerender_drops_erased_cells() {
    let mut grid = PixelGrid::new(1, 1);
    grid.set(0, 0, Color::from("white"));
    let mut fb = Framebuffer::for_grid(&grid, 4.0);
    render(&mut fb, &grid, 4.0);
    grid.set(0, 0, Color::Transparent);
    render(&mut fb, &grid, 4.0);
    assert!(fb.into_raw().iter().all(|b| *b == 0));
}

#[test]
fn framebuffer_skips_unresolvable_colors() {
    let mut grid = PixelGrid::new(1, 1);
    grid.set(0, 0, Color::from("notacolor"));
    let mut fb = Framebuffer::for_grid(&grid, 2.0);
    assert_eq!(render(&mut fb, &grid, 2.0), 1);
    assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn framebuffer_clips_rectangles_to_bounds() {
    let mut fb = Framebuffer::new(4, 4);
    fb.fill_rect(-10.0, 2.0, 100.0, 100.0, &Color::from("black"));
    assert_eq!(fb.pixel(0, 1), Some([0, 0, 0, 0]));
    assert_eq!(fb.pixel(3, 3), Some([0, 0, 0, 255]));
}
