//! Pixel mural client: a native host for the `canvas` painting engine.
//!
//! Drives [`canvas::engine::EngineCore`] from recorded or live input, renders
//! into an in-memory framebuffer, and keeps the grid synchronized with a
//! remote pixel store over HTTP.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`sync`] | Remote store trait, HTTP client, outbox, and load guard |
//! | [`session`] | Single-threaded dispatch loop |
//! | [`script`] | JSON-lines input scripts |
//! | [`export`] | PNG export |
//! | [`config`] | Client settings |

pub mod config;
pub mod export;
pub mod script;
pub mod session;
pub mod sync;
