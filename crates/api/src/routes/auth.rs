//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup/  -> signup
/// GET  /login/   -> login_page
/// POST /login/   -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup/", post(auth::signup))
        .route("/login/", get(auth::login_page).post(auth::login))
}
