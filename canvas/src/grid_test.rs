use super::*;

fn red() -> Color {
    Color::from("red")
}

// =============================================================
// Construction
// =============================================================

#[test]
fn default_grid_is_100_by_100_transparent() {
    let grid = PixelGrid::default();
    assert_eq!(grid.rows(), 100);
    assert_eq!(grid.cols(), 100);
    assert_eq!(grid.painted_count(), 0);
    assert!(grid.cells().all(|(_, c)| c.is_transparent()));
}

#[test]
fn cells_iterate_row_major() {
    let grid = PixelGrid::new(2, 3);
    let cells: Vec<Cell> = grid.cells().map(|(cell, _)| cell).collect();
    assert_eq!(cells.len(), 6);
    assert_eq!(cells[0], Cell::new(0, 0));
    assert_eq!(cells[2], Cell::new(0, 2));
    assert_eq!(cells[3], Cell::new(1, 0));
}

// =============================================================
// get / set
// =============================================================

#[test]
fn set_then_get() {
    let mut grid = PixelGrid::default();
    assert!(grid.set(3, 4, red()));
    assert_eq!(grid.get(3, 4), &red());
    assert!(grid.get(4, 3).is_transparent());
}

#[test]
fn set_overwrites() {
    let mut grid = PixelGrid::default();
    grid.set(0, 0, red());
    grid.set(0, 0, Color::from("blue"));
    assert_eq!(grid.get(0, 0), &Color::from("blue"));
}

#[test]
fn set_transparent_erases() {
    let mut grid = PixelGrid::default();
    grid.set(7, 7, red());
    assert!(grid.set(7, 7, Color::Transparent));
    assert!(grid.get(7, 7).is_transparent());
    assert_eq!(grid.painted_count(), 0);
}

#[test]
fn out_of_bounds_set_is_noop() {
    let mut grid = PixelGrid::default();
    let before = grid.clone();
    for (row, col) in [(-1, 0), (0, -1), (100, 0), (0, 100), (i64::MIN, i64::MAX)] {
        assert!(!grid.set(row, col, red()));
    }
    assert_eq!(grid, before);
}

#[test]
fn out_of_bounds_get_is_transparent() {
    let grid = PixelGrid::default();
    assert!(grid.get(-5, 2).is_transparent());
    assert!(grid.get(2, 100).is_transparent());
}

#[test]
fn contains_matches_bounds() {
    let grid = PixelGrid::new(10, 20);
    assert!(grid.contains(0, 0));
    assert!(grid.contains(9, 19));
    assert!(!grid.contains(10, 0));
    assert!(!grid.contains(0, 20));
    assert!(!grid.contains(-1, -1));
}

// =============================================================
// clear / painted
// =============================================================

#[test]
fn clear_resets_every_cell() {
    let mut grid = PixelGrid::default();
    grid.set(0, 0, red());
    grid.set(99, 99, red());
    grid.clear();
    assert_eq!(grid.painted_count(), 0);
    assert_eq!(grid, PixelGrid::default());
}

#[test]
fn painted_lists_non_transparent_cells() {
    let mut grid = PixelGrid::default();
    grid.set(5, 1, Color::from("blue"));
    grid.set(2, 9, red());
    grid.set(3, 3, Color::Transparent);
    let painted: Vec<Pixel> = grid.painted().collect();
    assert_eq!(painted, vec![Pixel::new(2, 9, red()), Pixel::new(5, 1, Color::from("blue"))]);
}

#[test]
fn pixel_wire_format() {
    let pixel = Pixel::new(3, 4, red());
    let json = serde_json::to_value(&pixel).unwrap();
    assert_eq!(json, serde_json::json!({"row": 3, "col": 4, "color": "red"}));
    let back: Pixel = serde_json::from_value(json).unwrap();
    assert_eq!(back.cell(), Cell::new(3, 4));
}
