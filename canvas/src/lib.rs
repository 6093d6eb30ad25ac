//! Pixel-grid painting engine.
//!
//! Owns the full lifecycle of a painting surface: the grid of colored cells,
//! the full-repaint renderer, the viewport (zoom, scroll, screen → cell
//! mapping), and the input state machine that turns raw pointer events into
//! paints, pans, and zooms. The host (browser glue or a native session) is
//! responsible only for feeding events in and applying the resulting
//! [`engine::Action`]s, including persisting painted pixels.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] and the [`engine::Action`] output |
//! | [`grid`] | Fixed-size [`grid::PixelGrid`] and pixel records |
//! | [`color`] | Color values, palette, and swatches |
//! | [`viewport`] | Zoom/scroll state and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`render`] | Full repaint onto a [`render::Surface`] |
//! | [`consts`] | Shared numeric constants (grid size, zoom limits, edge scroll) |
//! | `web` | `HtmlCanvasElement` binding (feature `web`) |

pub mod color;
pub mod consts;
pub mod engine;
pub mod grid;
pub mod input;
pub mod render;
pub mod viewport;
#[cfg(feature = "web")]
pub mod web;
