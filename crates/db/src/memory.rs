//! In-process [`Store`] used by tests and by development runs without
//! PostgreSQL.
//!
//! Enforces the same constraints as the SQL schema: unique usernames and
//! group slugs, and posts that reference an existing author and group.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use yatube_core::error::CoreError;
use yatube_core::types::{DbId, Timestamp};

use crate::error::StoreResult;
use crate::models::group::{CreateGroup, Group};
use crate::models::post::{CreatePost, Post, PostDetail, UpdatePost};
use crate::models::user::{CreateUser, User};
use crate::store::{FeedScope, Store};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    groups: Vec<Group>,
    posts: Vec<Post>,
    last_pub_date: Option<Timestamp>,
}

impl Tables {
    fn next_id<T>(rows: &[T], id: impl Fn(&T) -> DbId) -> DbId {
        rows.iter().map(id).max().unwrap_or(0) + 1
    }

    /// Current time, nudged forward so insertion order is always visible
    /// in `pub_date`.
    fn next_pub_date(&mut self) -> Timestamp {
        let now = Utc::now();
        let pub_date = match self.last_pub_date {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_pub_date = Some(pub_date);
        pub_date
    }

    fn check_references(&self, author_id: Option<DbId>, group_id: Option<DbId>) -> StoreResult<()> {
        if let Some(author_id) = author_id {
            if !self.users.iter().any(|u| u.id == author_id) {
                return Err(CoreError::Validation(format!(
                    "User with id {author_id} does not exist"
                ))
                .into());
            }
        }
        if let Some(group_id) = group_id {
            if !self.groups.iter().any(|g| g.id == group_id) {
                return Err(CoreError::Validation(format!(
                    "Group with id {group_id} does not exist"
                ))
                .into());
            }
        }
        Ok(())
    }

    fn detail(&self, post: &Post) -> PostDetail {
        let author_username = self
            .users
            .iter()
            .find(|u| u.id == post.author_id)
            .map(|u| u.username.clone())
            .unwrap_or_default();
        let group = post
            .group_id
            .and_then(|gid| self.groups.iter().find(|g| g.id == gid));
        PostDetail {
            id: post.id,
            text: post.text.clone(),
            pub_date: post.pub_date,
            author_id: post.author_id,
            author_username,
            group_id: post.group_id,
            group_slug: group.map(|g| g.slug.clone()),
            group_title: group.map(|g| g.title.clone()),
        }
    }

    fn scoped(&self, scope: FeedScope) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self
            .posts
            .iter()
            .filter(|p| match scope {
                FeedScope::All => true,
                FeedScope::Group(id) => p.group_id == Some(id),
                FeedScope::Author(id) => p.author_id == id,
            })
            .collect();
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(a.id.cmp(&b.id)));
        posts
    }
}

/// [`Store`] kept entirely in memory behind a `tokio` read-write lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a post with an explicit publication date.
    ///
    /// Lets tests build feeds whose creation times interleave arbitrarily.
    pub async fn seed_post(&self, input: &CreatePost, pub_date: Timestamp) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;
        tables.check_references(Some(input.author_id), input.group_id)?;
        let post = Post {
            id: Tables::next_id(&tables.posts, |p| p.id),
            text: input.text.clone(),
            pub_date,
            author_id: input.author_id,
            group_id: input.group_id,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == input.username) {
            return Err(CoreError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            ))
            .into());
        }
        let user = User {
            id: Tables::next_id(&tables.users, |u| u.id),
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_group(&self, input: &CreateGroup) -> StoreResult<Group> {
        let mut tables = self.tables.write().await;
        if tables.groups.iter().any(|g| g.slug == input.slug) {
            return Err(CoreError::Conflict(format!(
                "Group slug '{}' is already taken",
                input.slug
            ))
            .into());
        }
        let group = Group {
            id: Tables::next_id(&tables.groups, |g| g.id),
            title: input.title.clone(),
            slug: input.slug.clone(),
            description: input.description.clone(),
        };
        tables.groups.push(group.clone());
        Ok(group)
    }

    async fn find_group_by_id(&self, id: DbId) -> StoreResult<Option<Group>> {
        let tables = self.tables.read().await;
        Ok(tables.groups.iter().find(|g| g.id == id).cloned())
    }

    async fn find_group_by_slug(&self, slug: &str) -> StoreResult<Option<Group>> {
        let tables = self.tables.read().await;
        Ok(tables.groups.iter().find(|g| g.slug == slug).cloned())
    }

    async fn list_groups(&self) -> StoreResult<Vec<Group>> {
        let tables = self.tables.read().await;
        let mut groups = tables.groups.clone();
        groups.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(groups)
    }

    async fn create_post(&self, input: &CreatePost) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;
        tables.check_references(Some(input.author_id), input.group_id)?;
        let post = Post {
            id: Tables::next_id(&tables.posts, |p| p.id),
            text: input.text.clone(),
            pub_date: tables.next_pub_date(),
            author_id: input.author_id,
            group_id: input.group_id,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn find_post(&self, id: DbId) -> StoreResult<Option<PostDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.detail(p)))
    }

    async fn update_post(&self, id: DbId, input: &UpdatePost) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;
        tables.check_references(None, input.group_id)?;
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found("Post", id))?;
        post.text = input.text.clone();
        post.group_id = input.group_id;
        Ok(post.clone())
    }

    async fn count_posts(&self, scope: FeedScope) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.scoped(scope).len() as i64)
    }

    async fn list_posts(
        &self,
        scope: FeedScope,
        offset: i64,
        limit: i64,
    ) -> StoreResult<Vec<PostDetail>> {
        let tables = self.tables.read().await;
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(tables
            .scoped(scope)
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|p| tables.detail(p))
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
