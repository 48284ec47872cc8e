//! Post model, its joined read view, and write DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yatube_core::types::{DbId, Timestamp};

/// A row from the `posts` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub text: String,
    pub pub_date: Timestamp,
    pub author_id: DbId,
    pub group_id: Option<DbId>,
}

/// A post joined with its author's username and its group, as listed in feeds.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PostDetail {
    pub id: DbId,
    pub text: String,
    pub pub_date: Timestamp,
    pub author_id: DbId,
    pub author_username: String,
    pub group_id: Option<DbId>,
    pub group_slug: Option<String>,
    pub group_title: Option<String>,
}

/// DTO for creating a post. `author_id` is taken from the acting identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub author_id: DbId,
    pub text: String,
    pub group_id: Option<DbId>,
}

/// DTO for editing a post. The author cannot be changed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePost {
    pub text: String,
    pub group_id: Option<DbId>,
}
