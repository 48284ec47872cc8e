//! The repository interface used by the HTTP layer and the feed service.
//!
//! Handlers never reach into a backend directly; they hold an
//! `Arc<dyn Store>`. Relations are resolved through explicit queries such as
//! [`Store::list_posts`] with a [`FeedScope`], not by traversing models.

use async_trait::async_trait;
use yatube_core::error::CoreError;
use yatube_core::types::DbId;

use crate::error::StoreResult;
use crate::models::group::{CreateGroup, Group};
use crate::models::post::{CreatePost, Post, PostDetail, UpdatePost};
use crate::models::user::{CreateUser, User};
use crate::repositories::{GroupRepo, PostRepo, UserRepo};
use crate::DbPool;

/// Which posts a feed covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    All,
    Group(DbId),
    Author(DbId),
}

impl FeedScope {
    /// `(group_id, author_id)` filter pair for SQL binding.
    pub fn filters(self) -> (Option<DbId>, Option<DbId>) {
        match self {
            FeedScope::All => (None, None),
            FeedScope::Group(id) => (Some(id), None),
            FeedScope::Author(id) => (None, Some(id)),
        }
    }
}

/// Storage operations for users, groups and posts.
///
/// Every listing is ordered by `pub_date` descending, ties broken by id
/// ascending.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn create_group(&self, input: &CreateGroup) -> StoreResult<Group>;
    async fn find_group_by_id(&self, id: DbId) -> StoreResult<Option<Group>>;
    async fn find_group_by_slug(&self, slug: &str) -> StoreResult<Option<Group>>;
    async fn list_groups(&self) -> StoreResult<Vec<Group>>;

    async fn create_post(&self, input: &CreatePost) -> StoreResult<Post>;
    async fn find_post(&self, id: DbId) -> StoreResult<Option<PostDetail>>;
    /// Replace text and group. Fails with `NotFound` for an unknown id.
    async fn update_post(&self, id: DbId, input: &UpdatePost) -> StoreResult<Post>;
    async fn count_posts(&self, scope: FeedScope) -> StoreResult<i64>;
    async fn list_posts(
        &self,
        scope: FeedScope,
        offset: i64,
        limit: i64,
    ) -> StoreResult<Vec<PostDetail>>;

    /// Confirm the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;
}

/// [`Store`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn create_group(&self, input: &CreateGroup) -> StoreResult<Group> {
        Ok(GroupRepo::create(&self.pool, input).await?)
    }

    async fn find_group_by_id(&self, id: DbId) -> StoreResult<Option<Group>> {
        Ok(GroupRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_group_by_slug(&self, slug: &str) -> StoreResult<Option<Group>> {
        Ok(GroupRepo::find_by_slug(&self.pool, slug).await?)
    }

    async fn list_groups(&self) -> StoreResult<Vec<Group>> {
        Ok(GroupRepo::list(&self.pool).await?)
    }

    async fn create_post(&self, input: &CreatePost) -> StoreResult<Post> {
        Ok(PostRepo::create(&self.pool, input).await?)
    }

    async fn find_post(&self, id: DbId) -> StoreResult<Option<PostDetail>> {
        Ok(PostRepo::find_detail(&self.pool, id).await?)
    }

    async fn update_post(&self, id: DbId, input: &UpdatePost) -> StoreResult<Post> {
        match PostRepo::update(&self.pool, id, input).await? {
            Some(post) => Ok(post),
            None => {
                tracing::debug!(post_id = id, "Update matched no post");
                Err(CoreError::not_found("Post", id).into())
            }
        }
    }

    async fn count_posts(&self, scope: FeedScope) -> StoreResult<i64> {
        let (group_id, author_id) = scope.filters();
        Ok(PostRepo::count(&self.pool, group_id, author_id).await?)
    }

    async fn list_posts(
        &self,
        scope: FeedScope,
        offset: i64,
        limit: i64,
    ) -> StoreResult<Vec<PostDetail>> {
        let (group_id, author_id) = scope.filters();
        tracing::debug!(?scope, offset, limit, "Listing posts");
        Ok(PostRepo::list(&self.pool, group_id, author_id, limit, offset).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
