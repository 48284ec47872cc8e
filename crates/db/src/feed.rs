//! Listing service: paginated feeds of posts.
//!
//! Three scopes share one pagination contract (see
//! [`yatube_core::pagination`]): the global feed, a group's feed looked up
//! by slug, and an author's feed looked up by username.

use serde::Serialize;
use yatube_core::error::CoreError;
use yatube_core::pagination::{Page, PageRequest, Paginator};

use crate::error::StoreResult;
use crate::models::group::Group;
use crate::models::post::PostDetail;
use crate::models::user::UserResponse;
use crate::store::{FeedScope, Store};

/// A group together with one page of its posts.
#[derive(Debug, Serialize)]
pub struct GroupFeed {
    pub group: Group,
    pub page: Page<PostDetail>,
}

/// An author together with their total post count and one page of posts.
#[derive(Debug, Serialize)]
pub struct AuthorFeed {
    pub author: UserResponse,
    pub posts_count: i64,
    pub page: Page<PostDetail>,
}

/// Count, clamp the requested page, then fetch exactly that slice.
async fn paginate(
    store: &dyn Store,
    scope: FeedScope,
    request: PageRequest,
    per_page: i64,
) -> StoreResult<Page<PostDetail>> {
    let total = store.count_posts(scope).await?;
    let paginator = Paginator::new(total, per_page);
    let window = paginator.window(request);
    let items = store.list_posts(scope, window.offset, window.limit).await?;
    Ok(Page::new(items, window, &paginator))
}

/// All posts, newest first.
pub async fn list_all(
    store: &dyn Store,
    request: PageRequest,
    per_page: i64,
) -> StoreResult<Page<PostDetail>> {
    paginate(store, FeedScope::All, request, per_page).await
}

/// Posts in the group identified by `slug`.
pub async fn list_by_group(
    store: &dyn Store,
    slug: &str,
    request: PageRequest,
    per_page: i64,
) -> StoreResult<GroupFeed> {
    let group = store
        .find_group_by_slug(slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Group", slug))?;
    let page = paginate(store, FeedScope::Group(group.id), request, per_page).await?;
    Ok(GroupFeed { group, page })
}

/// Posts written by the user named `username`.
pub async fn list_by_author(
    store: &dyn Store,
    username: &str,
    request: PageRequest,
    per_page: i64,
) -> StoreResult<AuthorFeed> {
    let author = store
        .find_user_by_username(username)
        .await?
        .ok_or_else(|| CoreError::not_found("User", username))?;
    let page = paginate(store, FeedScope::Author(author.id), request, per_page).await?;
    Ok(AuthorFeed {
        author: UserResponse::from(&author),
        posts_count: page.total_items,
        page,
    })
}
