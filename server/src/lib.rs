//! Reference pixel store: a small HTTP service holding the sparse set of
//! painted cells.
//!
//! SYSTEM CONTEXT
//! ==============
//! Clients load the whole set once (`GET /api/pixels`) and then upsert one
//! cell per paint (`POST /api/pixels`). Transparent cells are never stored;
//! posting `"transparent"` removes the cell. State lives in memory and is
//! optionally mirrored to a JSON snapshot file by a background flush task.

pub mod config;
pub mod error;
pub mod persistence;
pub mod routes;
pub mod state;
