use super::*;
use crate::state::Mural;

fn body(row: i64, col: i64, color: &str) -> PixelBody {
    PixelBody { row, col, color: color.into() }
}

fn small_state() -> AppState {
    AppState::new(Mural::new(10, 10), None)
}

// =============================================================================
// validate
// =============================================================================

#[test]
fn validate_accepts_in_range_paint() {
    let pixel = validate(body(9, 0, " #ff0000 "), 10, 10).unwrap();
    assert_eq!(pixel, Pixel::new(9, 0, Color::from("#ff0000")));
}

#[test]
fn validate_maps_transparent_to_erase() {
    let pixel = validate(body(1, 1, "Transparent"), 10, 10).unwrap();
    assert!(pixel.color.is_transparent());
}

#[test]
fn validate_rejects_out_of_bounds() {
    for (row, col) in [(10, 0), (0, 10), (-1, 0), (0, -5)] {
        let err = validate(body(row, col, "red"), 10, 10).unwrap_err();
        assert!(matches!(err, ApiError::OutOfBounds { .. }), "({row}, {col})");
    }
}

#[test]
fn validate_rejects_empty_color() {
    let err = validate(body(0, 0, "   "), 10, 10).unwrap_err();
    assert!(matches!(err, ApiError::EmptyColor));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// handlers
// =============================================================================

#[tokio::test]
async fn upsert_then_list() {
    let state = small_state();
    upsert_pixel(State(state.clone()), Json(body(2, 3, "red"))).await.unwrap();
    upsert_pixel(State(state.clone()), Json(body(0, 7, "blue"))).await.unwrap();

    let Json(pixels) = list_pixels(State(state)).await;
    assert_eq!(pixels, vec![Pixel::new(0, 7, Color::from("blue")), Pixel::new(2, 3, Color::from("red"))]);
}

#[tokio::test]
async fn transparent_upsert_removes_cell() {
    let state = small_state();
    upsert_pixel(State(state.clone()), Json(body(2, 3, "red"))).await.unwrap();
    upsert_pixel(State(state.clone()), Json(body(2, 3, "transparent"))).await.unwrap();

    let Json(pixels) = list_pixels(State(state)).await;
    assert!(pixels.is_empty());
}

#[tokio::test]
async fn rejected_upsert_leaves_mural_untouched() {
    let state = small_state();
    let result = upsert_pixel(State(state.clone()), Json(body(50, 3, "red"))).await;
    assert!(result.is_err());
    assert!(!state.mural.read().await.is_dirty());
}

#[tokio::test]
async fn clear_empties_mural() {
    let state = small_state();
    upsert_pixel(State(state.clone()), Json(body(2, 3, "red"))).await.unwrap();
    let Json(ack) = clear_pixels(State(state.clone())).await;
    assert_eq!(ack, serde_json::json!({ "ok": true }));
    assert!(state.mural.read().await.is_empty());
}

#[test]
fn error_response_is_json_400() {
    let response = axum::response::IntoResponse::into_response(ApiError::EmptyColor);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
