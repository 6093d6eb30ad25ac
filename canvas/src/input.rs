//! Input model: raw events, intents, and the gesture state machine.
//!
//! Hosts translate their native events into [`InputEvent`]s. The
//! [`InputController`] folds each event into a small set of [`Intent`]s
//! (paint a cell, pan, zoom, scroll at an edge) using the current
//! [`ViewportTransform`]; the engine then applies those intents. Everything
//! here is plain data, so whole sessions can be replayed from JSON.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::color::{Color, Palette};
use crate::consts::EDGE_SCROLL_THRESHOLD_PX;
use crate::grid::Cell;
use crate::viewport::{Point, Size, ViewportTransform};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Left mouse button: draw.
    Primary,
    /// Middle mouse button: ignored.
    Middle,
    /// Right mouse button: pan.
    Secondary,
}

/// A host event, normalized. Positions are client (window) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer entered the surface.
    PointerEnter,
    /// Pointer left the surface.
    PointerLeave,
    /// Button pressed over the surface.
    PointerDown { x: f64, y: f64, button: Button },
    /// Button released.
    PointerUp { x: f64, y: f64, button: Button },
    /// Pointer moved anywhere in the window.
    PointerMove { x: f64, y: f64 },
    /// Wheel tick. Positive `dy` scrolls down.
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        dy: f64,
    },
    /// A palette swatch was chosen.
    SelectSwatch { name: String },
    /// Animation frame tick.
    Frame,
    /// The window was resized.
    Resize { width: f64, height: f64 },
    /// The surface's layout box moved or was restyled.
    Layout { origin: Point, displayed: Size },
}

/// What an event asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Paint the cell with the current color.
    Paint(Cell),
    /// Scroll the page by this offset.
    Pan { dx: f64, dy: f64 },
    /// Step zoom by `ticks` (positive zooms in).
    Zoom { ticks: i32 },
    /// Start a smooth one-cell scroll in this direction. Ignored while a
    /// previous edge scroll is still animating.
    ScrollEdge { dx: f64, dy: f64 },
}

/// Session-scoped UI choices: the palette and the color being painted.
#[derive(Debug, Clone)]
pub struct UiState {
    pub palette: Palette,
    current_color: Color,
    swatch: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl UiState {
    /// Start on the palette's first swatch.
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        let (swatch, current_color) = palette
            .swatches()
            .first()
            .map(|s| (s.name.clone(), s.color.clone()))
            .unwrap_or_default();
        Self { palette, current_color, swatch }
    }

    #[must_use]
    pub fn current_color(&self) -> &Color {
        &self.current_color
    }

    /// Name of the selected swatch.
    #[must_use]
    pub fn swatch(&self) -> &str {
        &self.swatch
    }

    /// Select a swatch by name. Unknown names leave the selection unchanged.
    pub fn select_swatch(&mut self, name: &str) -> bool {
        let Some(swatch) = self.palette.get(name) else {
            return false;
        };
        self.current_color = swatch.color.clone();
        self.swatch = swatch.name.clone();
        true
    }
}

/// Active gesture, tracked between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No button held.
    #[default]
    Idle,
    /// Primary button held: every cell crossed gets painted.
    Drawing {
        /// Last cell painted in this stroke.
        last_cell: Cell,
    },
    /// Secondary button held: drag scrolls the page.
    Panning {
        /// Client position at the previous event.
        last_screen: Point,
    },
}

/// Interprets events into intents and owns the transient input state.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    pub ui: UiState,
    pub state: InputState,
    over_surface: bool,
}

impl InputController {
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self { ui: UiState::new(palette), state: InputState::Idle, over_surface: false }
    }

    /// Wheel input is only honored while the pointer is over the surface.
    #[must_use]
    pub fn wheel_enabled(&self) -> bool {
        self.over_surface
    }

    /// Fold `event` into intents, updating gesture state.
    pub fn interpret(&mut self, event: &InputEvent, transform: &ViewportTransform) -> Vec<Intent> {
        match event {
            InputEvent::PointerEnter => {
                self.over_surface = true;
                Vec::new()
            }
            InputEvent::PointerLeave => {
                self.over_surface = false;
                self.state = InputState::Idle;
                Vec::new()
            }
            InputEvent::PointerDown { x, y, button } => self.press(Point::new(*x, *y), *button, transform),
            InputEvent::PointerUp { .. } => {
                self.state = InputState::Idle;
                Vec::new()
            }
            InputEvent::PointerMove { x, y } => self.moved(Point::new(*x, *y), transform),
            InputEvent::Wheel { dy, .. } => {
                if !self.over_surface || !dy.is_finite() || dy.abs() < f64::EPSILON {
                    return Vec::new();
                }
                let ticks = if *dy > 0.0 { -1 } else { 1 };
                vec![Intent::Zoom { ticks }]
            }
            InputEvent::SelectSwatch { name } => {
                self.ui.select_swatch(name);
                Vec::new()
            }
            InputEvent::Frame | InputEvent::Resize { .. } | InputEvent::Layout { .. } => Vec::new(),
        }
    }

    fn press(&mut self, pointer: Point, button: Button, transform: &ViewportTransform) -> Vec<Intent> {
        // Presses only arrive from the surface itself.
        self.over_surface = true;
        if self.state != InputState::Idle {
            return Vec::new();
        }
        match button {
            Button::Primary => {
                let cell = transform.screen_to_cell(pointer);
                self.state = InputState::Drawing { last_cell: cell };
                vec![Intent::Paint(cell)]
            }
            Button::Secondary => {
                self.state = InputState::Panning { last_screen: pointer };
                Vec::new()
            }
            Button::Middle => Vec::new(),
        }
    }

    fn moved(&mut self, pointer: Point, transform: &ViewportTransform) -> Vec<Intent> {
        let mut intents = Vec::new();
        match &mut self.state {
            InputState::Idle => {}
            InputState::Drawing { last_cell } => {
                let cell = transform.screen_to_cell(pointer);
                if cell != *last_cell {
                    *last_cell = cell;
                    intents.push(Intent::Paint(cell));
                }
            }
            InputState::Panning { last_screen } => {
                let dx = pointer.x - last_screen.x;
                let dy = pointer.y - last_screen.y;
                *last_screen = pointer;
                if dx.abs() > f64::EPSILON || dy.abs() > f64::EPSILON {
                    intents.push(Intent::Pan { dx: -dx, dy: -dy });
                }
            }
        }
        if let Some(delta) = transform.edge_scroll_delta(pointer, EDGE_SCROLL_THRESHOLD_PX) {
            intents.push(Intent::ScrollEdge { dx: delta.x, dy: delta.y });
        }
        intents
    }
}
