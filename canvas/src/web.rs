//! Browser binding: renders into an `HtmlCanvasElement` through its 2D context.
//!
//! The host JavaScript layer wires DOM events to [`Engine::handle`], applies
//! the returned [`Action`]s (page scroll, CSS zoom, wheel listener, network
//! persistence) and calls [`Engine::render`] on `RenderNeeded`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Color;
use crate::engine::{Action, EngineCore};
use crate::input::InputEvent;
use crate::render::{self, Surface, logical_size};

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &Color) {
        self.set_fill_style_str(color.as_str());
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the 2D context.
pub struct Engine {
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Bind to `canvas`, sizing its backing store to the logical surface.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(canvas: &HtmlCanvasElement, core: EngineCore) -> Result<Self, JsValue> {
        let (width, height) = logical_size(&core.grid, core.viewport.cell_size);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, core })
    }

    pub fn handle(&mut self, event: &InputEvent) -> Vec<Action> {
        self.core.handle(event)
    }

    /// Draw the grid to the canvas. Returns the number of cells filled.
    pub fn render(&mut self) -> usize {
        render::render(&mut self.ctx, &self.core.grid, self.core.viewport.cell_size)
    }

    /// CSS `transform` value presenting the current zoom.
    #[must_use]
    pub fn css_transform(&self) -> String {
        self.core.viewport.css_transform()
    }

    /// CSS `transform-origin` value matching the zoom anchor.
    #[must_use]
    pub fn css_transform_origin(&self) -> &'static str {
        self.core.viewport.css_transform_origin()
    }
}
