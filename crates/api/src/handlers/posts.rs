//! Handlers for feeds, the post detail page, and the create/edit flows.
//!
//! Create: `Form -> Saved` (redirect to the author's profile).
//! Edit: `Denied` (redirect to the post) for anyone but the author, otherwise
//! `Form -> Saved` (redirect to the post). A rejected submission stays in
//! `Form` and is answered `200` with the submitted values and the errors.

use std::collections::BTreeMap;

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use yatube_core::error::CoreError;
use yatube_core::pagination::Page;
use yatube_core::posts::{can_edit, post_label, post_title, validate_post_text};
use yatube_core::types::DbId;
use yatube_db::feed::{self, AuthorFeed, GroupFeed};
use yatube_db::models::group::Group;
use yatube_db::models::post::{CreatePost, PostDetail, UpdatePost};
use yatube_db::{FeedScope, Store};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{MaybeUser, RequireLogin};
use crate::query::PageParams;
use crate::response::{found, DataResponse};
use crate::state::AppState;
use crate::urls::{post_edit_path, post_path, profile_path};

/// Heading of the global feed.
pub const INDEX_TITLE: &str = "Latest updates on the site";

/// Error attached to a `group` value that is not an existing group id.
pub const INVALID_GROUP_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

// ---------------------------------------------------------------------------
// Response and form types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct IndexView {
    pub title: &'static str,
    pub page: Page<PostDetail>,
}

#[derive(Debug, Serialize)]
pub struct GroupView {
    pub title: String,
    #[serde(flatten)]
    pub feed: GroupFeed,
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub post: PostDetail,
    pub title: String,
    pub author_posts_count: i64,
    /// Edit link, only for the post's author.
    pub edit_url: Option<String>,
}

/// Submitted (or prefilled) post form values.
///
/// `group` is the group id as text; empty or absent means "no group".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PostForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
}

/// Field name -> messages.
pub type FormErrors = BTreeMap<&'static str, Vec<String>>;

#[derive(Debug, Serialize)]
pub struct PostFormView {
    pub is_edit: bool,
    pub post_id: Option<DbId>,
    pub form: PostForm,
    pub errors: FormErrors,
    pub groups: Vec<Group>,
}

/// Form values after validation.
struct CleanedPost {
    text: String,
    group_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Post ids come from the path as text so a non-numeric id is a 404, not a 400.
fn parse_post_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::Core(CoreError::not_found("Post", raw)))
}

/// Fetch a post by id or return 404.
async fn ensure_post(store: &dyn Store, id: DbId) -> AppResult<PostDetail> {
    store
        .find_post(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Post", id)))
}

/// Unwrap a submitted form body. A body that is not a valid urlencoded
/// post form is a `400` with the usual JSON error shape.
fn submitted_form(form: Result<Form<PostForm>, FormRejection>) -> AppResult<PostForm> {
    form.map(|Form(form)| form).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Unreadable post form");
        AppError::Core(CoreError::Validation(rejection.body_text()))
    })
}

/// Run the post validator and resolve the group choice.
///
/// Returns the field errors instead of failing so the form can be shown
/// again with the submitted values.
async fn clean_post_form(
    store: &dyn Store,
    form: &PostForm,
) -> AppResult<Result<CleanedPost, FormErrors>> {
    let mut errors = FormErrors::new();

    match validate_post_text(&form.text) {
        Ok(()) => {}
        Err(CoreError::Validation(msg)) => errors.entry("text").or_default().push(msg),
        Err(other) => return Err(other.into()),
    }

    let group_id = match form.group.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => {
            let existing = match raw.parse::<DbId>() {
                Ok(id) => store.find_group_by_id(id).await?.map(|g| g.id),
                Err(_) => None,
            };
            if existing.is_none() {
                errors
                    .entry("group")
                    .or_default()
                    .push(INVALID_GROUP_CHOICE.to_string());
            }
            existing
        }
    };

    if !errors.is_empty() {
        return Ok(Err(errors));
    }
    Ok(Ok(CleanedPost {
        text: form.text.clone(),
        group_id,
    }))
}

/// Answer `200` with the post form.
async fn render_form(
    store: &dyn Store,
    post_id: Option<DbId>,
    form: PostForm,
    errors: FormErrors,
) -> AppResult<Response> {
    let groups = store.list_groups().await?;
    let view = PostFormView {
        is_edit: post_id.is_some(),
        post_id,
        form,
        errors,
        groups,
    };
    Ok(Json(DataResponse { data: view }).into_response())
}

// ---------------------------------------------------------------------------
// Feeds
// ---------------------------------------------------------------------------

/// GET /
///
/// All posts, newest first.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<IndexView>>> {
    let page = feed::list_all(
        state.store.as_ref(),
        params.request(),
        state.config.posts_per_page,
    )
    .await?;
    Ok(Json(DataResponse {
        data: IndexView {
            title: INDEX_TITLE,
            page,
        },
    }))
}

/// GET /group/{slug}/
///
/// Posts of one group. 404 for an unknown slug.
pub async fn group_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<GroupView>>> {
    let feed = feed::list_by_group(
        state.store.as_ref(),
        &slug,
        params.request(),
        state.config.posts_per_page,
    )
    .await?;
    Ok(Json(DataResponse {
        data: GroupView {
            title: format!("Posts of community {}", feed.group.title),
            feed,
        },
    }))
}

/// GET /profile/{username}/
///
/// Posts of one author. 404 for an unknown username.
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<AuthorFeed>>> {
    let feed = feed::list_by_author(
        state.store.as_ref(),
        &username,
        params.request(),
        state.config.posts_per_page,
    )
    .await?;
    Ok(Json(DataResponse { data: feed }))
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// GET /posts/{post_id}/
pub async fn post_detail(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<PostView>>> {
    let post = ensure_post(state.store.as_ref(), parse_post_id(&raw_id)?).await?;
    let author_posts_count = state
        .store
        .count_posts(FeedScope::Author(post.author_id))
        .await?;
    let edit_url = user
        .filter(|u| can_edit(u.user_id, post.author_id))
        .map(|_| post_edit_path(post.id));
    Ok(Json(DataResponse {
        data: PostView {
            title: post_title(&post.text, state.config.title_max_chars),
            post,
            author_posts_count,
            edit_url,
        },
    }))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// GET /create/
///
/// Empty post form.
pub async fn post_create_form(
    RequireLogin(_user): RequireLogin,
    State(state): State<AppState>,
) -> AppResult<Response> {
    render_form(
        state.store.as_ref(),
        None,
        PostForm::default(),
        FormErrors::new(),
    )
    .await
}

/// POST /create/
///
/// Validate and save; the requester becomes the author.
pub async fn post_create(
    RequireLogin(user): RequireLogin,
    State(state): State<AppState>,
    form: Result<Form<PostForm>, FormRejection>,
) -> AppResult<Response> {
    let form = submitted_form(form)?;
    let cleaned = match clean_post_form(state.store.as_ref(), &form).await? {
        Ok(cleaned) => cleaned,
        Err(errors) => {
            tracing::debug!(user_id = user.user_id, ?errors, "Post form rejected");
            return render_form(state.store.as_ref(), None, form, errors).await;
        }
    };

    let post = state
        .store
        .create_post(&CreatePost {
            author_id: user.user_id,
            text: cleaned.text,
            group_id: cleaned.group_id,
        })
        .await?;

    tracing::info!(
        user_id = user.user_id,
        post_id = post.id,
        group_id = ?post.group_id,
        label = %post_label(&post.text),
        "Post created"
    );

    Ok(found(&profile_path(&user.username)))
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// GET /posts/{post_id}/edit/
///
/// Form prefilled with the post. Non-authors are sent to the post itself.
pub async fn post_edit_form(
    RequireLogin(user): RequireLogin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let post = ensure_post(state.store.as_ref(), parse_post_id(&raw_id)?).await?;

    if !can_edit(user.user_id, post.author_id) {
        tracing::debug!(user_id = user.user_id, post_id = post.id, "Edit denied");
        return Ok(found(&post_path(post.id)));
    }

    let form = PostForm {
        text: post.text,
        group: post.group_id.map(|id| id.to_string()),
    };
    render_form(state.store.as_ref(), Some(post.id), form, FormErrors::new()).await
}

/// POST /posts/{post_id}/edit/
///
/// Replace text and group. The author never changes. The body is only read
/// once the requester is known to be the author.
pub async fn post_edit(
    RequireLogin(user): RequireLogin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    form: Result<Form<PostForm>, FormRejection>,
) -> AppResult<Response> {
    let post = ensure_post(state.store.as_ref(), parse_post_id(&raw_id)?).await?;

    if !can_edit(user.user_id, post.author_id) {
        tracing::warn!(
            user_id = user.user_id,
            post_id = post.id,
            author_id = post.author_id,
            "Edit by non-author ignored"
        );
        return Ok(found(&post_path(post.id)));
    }

    let form = submitted_form(form)?;
    let cleaned = match clean_post_form(state.store.as_ref(), &form).await? {
        Ok(cleaned) => cleaned,
        Err(errors) => {
            tracing::debug!(
                user_id = user.user_id,
                post_id = post.id,
                ?errors,
                "Post form rejected"
            );
            return render_form(state.store.as_ref(), Some(post.id), form, errors).await;
        }
    };

    let updated = state
        .store
        .update_post(
            post.id,
            &UpdatePost {
                text: cleaned.text,
                group_id: cleaned.group_id,
            },
        )
        .await?;

    tracing::info!(
        user_id = user.user_id,
        post_id = updated.id,
        group_id = ?updated.group_id,
        "Post updated"
    );

    Ok(found(&post_path(updated.id)))
}
