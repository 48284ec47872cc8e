//! Route definitions for feeds and posts.

use axum::routing::get;
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Feed, detail, and post form routes.
///
/// ```text
/// GET  /                        -> index
/// GET  /group/{slug}/           -> group_posts
/// GET  /profile/{username}/     -> profile
/// GET  /posts/{post_id}/        -> post_detail
/// GET  /create/                 -> post_create_form
/// POST /create/                 -> post_create
/// GET  /posts/{post_id}/edit/   -> post_edit_form
/// POST /posts/{post_id}/edit/   -> post_edit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::index))
        .route("/group/{slug}/", get(posts::group_posts))
        .route("/profile/{username}/", get(posts::profile))
        .route("/posts/{post_id}/", get(posts::post_detail))
        .route(
            "/create/",
            get(posts::post_create_form).post(posts::post_create),
        )
        .route(
            "/posts/{post_id}/edit/",
            get(posts::post_edit_form).post(posts::post_edit),
        )
}
