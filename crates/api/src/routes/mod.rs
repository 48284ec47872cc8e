pub mod auth;
pub mod health;
pub mod posts;

use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the route tree.
///
/// ```text
/// /                              global feed (?page=)
/// /group/{slug}/                 group feed (?page=)
/// /profile/{username}/           author feed (?page=)
/// /posts/{post_id}/              post detail
/// /create/                       post form, create (login required)
/// /posts/{post_id}/edit/         post form, edit (author only)
///
/// /auth/signup/                  register (POST)
/// /auth/login/                   login target (GET), login (POST)
/// ```
///
/// Anything else falls through to a JSON 404.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(posts::router())
        .nest("/auth", auth::router())
        .fallback(handlers::not_found)
}
