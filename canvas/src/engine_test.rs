#![allow(clippy::float_cmp)]

use super::*;
use crate::input::Button;

// =============================================================
// Helpers
// =============================================================

fn core() -> EngineCore {
    let mut core = EngineCore::default();
    core.handle(&InputEvent::PointerEnter);
    core
}

fn windowed() -> EngineCore {
    let mut core = core();
    core.handle(&InputEvent::Resize { width: 800.0, height: 600.0 });
    core
}

fn press(core: &mut EngineCore, x: f64, y: f64, button: Button) -> Vec<Action> {
    core.handle(&InputEvent::PointerDown { x, y, button })
}

fn release(core: &mut EngineCore, x: f64, y: f64, button: Button) -> Vec<Action> {
    core.handle(&InputEvent::PointerUp { x, y, button })
}

fn move_to(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.handle(&InputEvent::PointerMove { x, y })
}

fn wheel(core: &mut EngineCore, dy: f64) -> Vec<Action> {
    core.handle(&InputEvent::Wheel { x: 100.0, y: 100.0, dx: 0.0, dy })
}

fn select(core: &mut EngineCore, name: &str) {
    core.handle(&InputEvent::SelectSwatch { name: name.into() });
}

fn scrolls(actions: &[Action]) -> Vec<Point> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::ScrollTo(p) => Some(*p),
            _ => None,
        })
        .collect()
}

// =============================================================
// Painting
// =============================================================

#[test]
fn click_paints_current_color() {
    let mut core = core();
    select(&mut core, "red");
    let actions = press(&mut core, 85.0, 65.0, Button::Primary);
    assert_eq!(
        actions,
        vec![Action::PixelPainted(Pixel::new(3, 4, Color::from("red"))), Action::RenderNeeded]
    );
    assert_eq!(core.grid.get(3, 4), &Color::from("red"));
}

#[test]
fn drag_paints_each_crossed_cell_once() {
    let mut core = core();
    press(&mut core, 5.0, 5.0, Button::Primary);
    let mut painted = Vec::new();
    for x in [6.0, 12.0, 25.0, 30.0, 45.0] {
        for action in move_to(&mut core, x, 5.0) {
            if let Action::PixelPainted(p) = action {
                painted.push(p.cell());
            }
        }
    }
    assert_eq!(painted, vec![Cell::new(0, 1), Cell::new(0, 2)]);
    assert_eq!(core.grid.painted_count(), 3);
}

#[test]
fn press_outside_grid_is_noop() {
    let mut core = core();
    let before = core.grid.clone();
    assert!(press(&mut core, -5.0, -5.0, Button::Primary).is_empty());
    assert!(press(&mut core, 2005.0, 10.0, Button::Primary).is_empty());
    assert_eq!(core.grid, before);
}

#[test]
fn eraser_paints_transparent() {
    let mut core = core();
    press(&mut core, 85.0, 65.0, Button::Primary);
    release(&mut core, 85.0, 65.0, Button::Primary);
    select(&mut core, "eraser");
    let actions = press(&mut core, 85.0, 65.0, Button::Primary);
    assert_eq!(actions, vec![Action::PixelPainted(Pixel::new(3, 4, Color::Transparent)), Action::RenderNeeded]);
    assert!(core.grid.get(3, 4).is_transparent());
    assert_eq!(core.grid.painted_count(), 0);
}

#[test]
fn repainting_same_color_still_reports() {
    let mut core = core();
    press(&mut core, 5.0, 5.0, Button::Primary);
    release(&mut core, 5.0, 5.0, Button::Primary);
    let actions = press(&mut core, 5.0, 5.0, Button::Primary);
    assert_eq!(actions.len(), 2);
}

#[test]
fn paint_follows_zoom_and_scroll() {
    let mut core = windowed();
    core.viewport.anchor = crate::viewport::ZoomAnchor::TopLeft;
    for _ in 0..10 {
        wheel(&mut core, -1.0);
    }
    assert_eq!(core.zoom(), 2.0);
    core.viewport.scroll_to(Point::new(40.0, 0.0));
    // Client x = 100 → logical (100 + 40) / 2 = 70 → col 3.
    let actions = press(&mut core, 100.0, 10.0, Button::Primary);
    assert_eq!(actions[0], Action::PixelPainted(Pixel::new(0, 3, Color::from("black"))));
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn enter_and_leave_toggle_wheel_capture() {
    let mut core = EngineCore::default();
    assert_eq!(core.handle(&InputEvent::PointerEnter), vec![Action::WheelCapture(true)]);
    assert!(core.handle(&InputEvent::PointerEnter).is_empty());
    assert_eq!(core.handle(&InputEvent::PointerLeave), vec![Action::WheelCapture(false)]);
}

#[test]
fn wheel_up_zooms_in_and_consumes() {
    let mut core = core();
    let actions = wheel(&mut core, -100.0);
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0], Action::ConsumeWheel);
    let Action::ZoomChanged(z) = actions[1] else {
        panic!("expected ZoomChanged, got {:?}", actions[1]);
    };
    assert!((z - 1.1).abs() < 1e-9);
}

#[test]
fn wheel_at_limit_only_consumes() {
    let mut core = core();
    for _ in 0..5 {
        wheel(&mut core, 100.0);
    }
    assert_eq!(core.zoom(), 0.5);
    assert_eq!(wheel(&mut core, 100.0), vec![Action::ConsumeWheel]);
}

#[test]
fn wheel_outside_surface_does_nothing() {
    let mut core = EngineCore::default();
    assert!(wheel(&mut core, 100.0).is_empty());
    assert_eq!(core.zoom(), 1.0);
}

#[test]
fn zooming_out_reclamps_scroll() {
    let mut core = windowed();
    for _ in 0..10 {
        wheel(&mut core, -1.0);
    }
    core.viewport.scroll_to(Point::new(99_999.0, 99_999.0));
    let actions = wheel(&mut core, 1.0);
    let scrolled = scrolls(&actions);
    assert_eq!(scrolled.len(), 1);
    assert!((scrolled[0].x - 2100.0).abs() < 1e-6);
    assert!((scrolled[0].y - 2300.0).abs() < 1e-6);
}

// =============================================================
// Panning
// =============================================================

#[test]
fn right_drag_scrolls_page() {
    let mut core = windowed();
    press(&mut core, 400.0, 300.0, Button::Secondary);
    let actions = move_to(&mut core, 390.0, 280.0);
    assert_eq!(actions, vec![Action::ScrollTo(Point::new(10.0, 20.0))]);
    assert_eq!(core.grid.painted_count(), 0);
}

#[test]
fn pan_at_scroll_limit_emits_nothing() {
    let mut core = windowed();
    press(&mut core, 400.0, 300.0, Button::Secondary);
    assert!(move_to(&mut core, 410.0, 310.0).is_empty());
}

// =============================================================
// Edge autoscroll
// =============================================================

#[test]
fn edge_scroll_animates_one_cell_over_frames() {
    let mut core = windowed();
    assert!(move_to(&mut core, 795.0, 300.0).is_empty());
    assert!(core.is_animating());

    let mut frames = 0;
    while core.is_animating() {
        let actions = core.handle(&InputEvent::Frame);
        assert_eq!(scrolls(&actions).len(), 1);
        frames += 1;
    }
    assert_eq!(frames, EDGE_SCROLL_STEPS);
    assert!((core.scroll().x - 20.0).abs() < 1e-9);
    assert_eq!(core.scroll().y, 0.0);
}

#[test]
fn edge_triggers_coalesce_while_animating() {
    let mut core = windowed();
    move_to(&mut core, 795.0, 300.0);
    core.handle(&InputEvent::Frame);
    move_to(&mut core, 796.0, 300.0);
    move_to(&mut core, 797.0, 300.0);
    let mut frames = 1;
    while core.is_animating() {
        core.handle(&InputEvent::Frame);
        frames += 1;
    }
    assert_eq!(frames, EDGE_SCROLL_STEPS);
    assert!((core.scroll().x - 20.0).abs() < 1e-9);
}

#[test]
fn edge_scroll_at_origin_is_clamped() {
    let mut core = windowed();
    move_to(&mut core, 2.0, 300.0);
    while core.is_animating() {
        assert!(core.handle(&InputEvent::Frame).is_empty());
    }
    assert_eq!(core.scroll(), Point::default());
}

#[test]
fn no_edge_scroll_before_resize() {
    let mut core = core();
    move_to(&mut core, 1.0, 1.0);
    assert!(!core.is_animating());
}

#[test]
fn frame_while_idle_is_noop() {
    let mut core = windowed();
    assert!(core.handle(&InputEvent::Frame).is_empty());
}

// =============================================================
// Geometry updates
// =============================================================

#[test]
fn growing_window_reclamps_scroll() {
    let mut core = windowed();
    core.viewport.scroll_to(Point::new(1200.0, 1400.0));
    let actions = core.handle(&InputEvent::Resize { width: 1600.0, height: 1200.0 });
    assert_eq!(actions, vec![Action::ScrollTo(Point::new(400.0, 800.0))]);
}

#[test]
fn layout_change_reclamps_scroll() {
    let mut core = windowed();
    core.viewport.scroll_to(Point::new(1200.0, 1400.0));
    let actions = core.handle(&InputEvent::Layout {
        origin: Point::default(),
        displayed: Size::new(1000.0, 1000.0),
    });
    assert_eq!(actions, vec![Action::ScrollTo(Point::new(200.0, 400.0))]);
}

#[test]
fn custom_grid_and_palette() {
    let mut core = EngineCore::new(PixelGrid::new(4, 4), Palette::parse("teal,navy"), 10.0);
    assert_eq!(core.current_color(), &Color::from("teal"));
    assert_eq!(core.viewport.logical, Size::new(40.0, 40.0));
    core.handle(&InputEvent::PointerEnter);
    assert!(press(&mut core, 45.0, 5.0, Button::Primary).is_empty());
    release(&mut core, 45.0, 5.0, Button::Primary);
    let actions = press(&mut core, 35.0, 5.0, Button::Primary);
    assert_eq!(actions[0], Action::PixelPainted(Pixel::new(0, 3, Color::from("teal"))));
}
