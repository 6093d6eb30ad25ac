use crate::color::{Color, Palette};
use crate::consts::{CELL_SIZE_PX, EDGE_SCROLL_STEPS};
use crate::grid::{Cell, Pixel, PixelGrid};
use crate::input::{InputController, InputEvent, Intent};
use crate::viewport::{Point, ScrollAnimation, Size, SurfaceLayout, ViewportTransform};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A cell changed locally; persist it.
    PixelPainted(Pixel),
    /// The grid changed; repaint the surface.
    RenderNeeded,
    /// Scroll the page to this offset.
    ScrollTo(Point),
    /// Present the surface at this visual scale.
    ZoomChanged(f64),
    /// Suppress the wheel event's default page scroll.
    ConsumeWheel,
    /// Attach (`true`) or detach the wheel listener.
    WheelCapture(bool),
}

/// Core engine state: all logic that doesn't depend on a drawing surface.
///
/// Separated from any host binding so it can be driven and tested without a
/// browser or window.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub grid: PixelGrid,
    pub viewport: ViewportTransform,
    pub input: InputController,
    scroll_animation: Option<ScrollAnimation>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(PixelGrid::default(), Palette::default(), CELL_SIZE_PX)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(grid: PixelGrid, palette: Palette, cell_size: f64) -> Self {
        let viewport = ViewportTransform::for_grid(&grid, cell_size);
        Self { grid, viewport, input: InputController::new(palette), scroll_animation: None }
    }

    // --- Queries ---

    #[must_use]
    pub fn current_color(&self) -> &Color {
        self.input.ui.current_color()
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    #[must_use]
    pub fn scroll(&self) -> Point {
        self.viewport.state.scroll()
    }

    /// Whether an edge-autoscroll is still running and wants frame ticks.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scroll_animation.is_some()
    }

    // --- Input ---

    /// Handle one host event.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<Action> {
        let mut actions = match event {
            InputEvent::Frame => return self.tick(),
            InputEvent::Resize { width, height } => {
                self.viewport.window = Size::new(*width, *height);
                self.reclamp_scroll()
            }
            InputEvent::Layout { origin, displayed } => {
                self.viewport.layout = SurfaceLayout { origin: *origin, displayed: *displayed };
                self.reclamp_scroll()
            }
            _ => Vec::new(),
        };

        let capturing = self.input.wheel_enabled();
        let intents = self.input.interpret(event, &self.viewport);
        if capturing != self.input.wheel_enabled() {
            actions.push(Action::WheelCapture(self.input.wheel_enabled()));
        }
        for intent in intents {
            actions.extend(self.dispatch(intent));
        }
        actions
    }

    /// Apply a single intent.
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Action> {
        match intent {
            Intent::Paint(cell) => self.paint(cell),
            Intent::Pan { dx, dy } => {
                if self.viewport.scroll_by(dx, dy) {
                    vec![Action::ScrollTo(self.scroll())]
                } else {
                    Vec::new()
                }
            }
            Intent::Zoom { ticks } => {
                let mut actions = vec![Action::ConsumeWheel];
                if self.viewport.state.zoom_by(ticks) {
                    actions.push(Action::ZoomChanged(self.zoom()));
                    actions.extend(self.reclamp_scroll());
                }
                actions
            }
            Intent::ScrollEdge { dx, dy } => {
                // One cell per trigger; triggers during a running scroll coalesce.
                if self.scroll_animation.is_none() {
                    self.scroll_animation = Some(ScrollAnimation::new(Point::new(dx, dy), EDGE_SCROLL_STEPS));
                }
                Vec::new()
            }
        }
    }

    /// Paint `cell` with the current color. Erasing is painting transparent.
    pub fn paint(&mut self, cell: Cell) -> Vec<Action> {
        let color = self.current_color().clone();
        if !self.grid.set(cell.row, cell.col, color.clone()) {
            return Vec::new();
        }
        vec![Action::PixelPainted(Pixel::new(cell.row, cell.col, color)), Action::RenderNeeded]
    }

    /// Advance the edge-autoscroll animation by one frame.
    pub fn tick(&mut self) -> Vec<Action> {
        let Some(animation) = self.scroll_animation.as_mut() else {
            return Vec::new();
        };
        let step = animation.next();
        if animation.is_finished() {
            self.scroll_animation = None;
        }
        match step {
            Some(delta) if self.viewport.scroll_by(delta.x, delta.y) => vec![Action::ScrollTo(self.scroll())],
            _ => Vec::new(),
        }
    }

    fn reclamp_scroll(&mut self) -> Vec<Action> {
        if self.viewport.scroll_by(0.0, 0.0) {
            vec![Action::ScrollTo(self.scroll())]
        } else {
            Vec::new()
        }
    }
}
