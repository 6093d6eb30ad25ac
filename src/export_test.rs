use super::*;
use canvas::color::Color;
use canvas::grid::PixelGrid;
use canvas::render::render;

fn painted_framebuffer() -> Framebuffer {
    let mut grid = PixelGrid::new(2, 3);
    grid.set(1, 2, Color::from("blue"));
    let mut fb = Framebuffer::for_grid(&grid, 4.0);
    render(&mut fb, &grid, 4.0);
    fb
}

#[test]
fn image_matches_framebuffer() {
    let img = to_image(painted_framebuffer()).unwrap();
    assert_eq!(img.dimensions(), (12, 8));
    assert_eq!(img.get_pixel(9, 5).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn png_round_trips_through_disk() {
    let path = std::env::temp_dir().join(format!("pixelmural-export-{}.png", std::process::id()));
    write_png(painted_framebuffer(), &path).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(back.dimensions(), (12, 8));
    assert_eq!(back.get_pixel(11, 7).0, [0, 0, 255, 255]);
}
