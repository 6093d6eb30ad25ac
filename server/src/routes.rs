//! Router assembly and the pixel handlers.
//!
//! SYSTEM CONTEXT
//! ==============
//! One resource, `/api/pixels`, plus a liveness probe. Handlers validate
//! against the mural's grid, mutate under the write lock, and leave disk
//! writes to the persistence task.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use canvas::color::Color;
use canvas::grid::Pixel;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/pixels", get(list_pixels).post(upsert_pixel).delete(clear_pixels))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct PixelBody {
    pub row: i64,
    pub col: i64,
    pub color: String,
}

/// Check a posted body against the grid. The color string is kept
/// verbatim apart from trimming; `"transparent"` becomes an erase.
pub(crate) fn validate(body: PixelBody, rows: usize, cols: usize) -> Result<Pixel, ApiError> {
    if body.color.trim().is_empty() {
        return Err(ApiError::EmptyColor);
    }
    let in_range =
        usize::try_from(body.row).is_ok_and(|r| r < rows) && usize::try_from(body.col).is_ok_and(|c| c < cols);
    if !in_range {
        return Err(ApiError::OutOfBounds { row: body.row, col: body.col, rows, cols });
    }
    Ok(Pixel::new(body.row, body.col, Color::parse(&body.color)))
}

pub async fn list_pixels(State(state): State<AppState>) -> Json<Vec<Pixel>> {
    let mural = state.mural.read().await;
    Json(mural.pixels())
}

pub async fn upsert_pixel(
    State(state): State<AppState>,
    Json(body): Json<PixelBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut mural = state.mural.write().await;
    let pixel = validate(body, mural.rows(), mural.cols())?;
    let (row, col) = (pixel.row, pixel.col);
    let erase = pixel.color.is_transparent();
    let changed = mural.apply(pixel);
    debug!(row, col, erase, changed, version = mural.version(), "pixel upserted");
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub async fn clear_pixels(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut mural = state.mural.write().await;
    let removed = mural.len();
    mural.clear();
    info!(removed, "mural cleared");
    Json(serde_json::json!({ "ok": true }))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
