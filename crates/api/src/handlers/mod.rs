//! Request handlers.
//!
//! Handlers read from the [`yatube_db::Store`] held in
//! [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod posts;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Fallback for unmatched routes: the same JSON shape as other 404s.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Page not found",
            "code": "NOT_FOUND",
        })),
    )
        .into_response()
}
