//! Error types for the HTTP surface and the snapshot file.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Request validation failures. All map to `400` with `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds { row: i64, col: i64, rows: usize, cols: usize },
    #[error("color must not be empty")]
    EmptyColor,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Snapshot file failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not a pixel list: {0}")]
    Json(#[from] serde_json::Error),
}
