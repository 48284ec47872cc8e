//! Repository for the `posts` table.
//!
//! Feed queries share one filter shape: a nullable group id and a nullable
//! author id. Every listing is ordered `pub_date DESC, id ASC`.

use sqlx::PgPool;
use yatube_core::types::DbId;

use crate::models::post::{CreatePost, Post, PostDetail, UpdatePost};

/// Column list for plain `posts` rows.
const COLUMNS: &str = "id, text, pub_date, author_id, group_id";

/// Joined select producing [`PostDetail`] rows.
const DETAIL_SELECT: &str = "SELECT p.id, p.text, p.pub_date, p.author_id, \
    u.username AS author_username, p.group_id, \
    g.slug AS group_slug, g.title AS group_title \
    FROM posts p \
    JOIN users u ON u.id = p.author_id \
    LEFT JOIN groups g ON g.id = p.group_id";

/// Provides CRUD and feed queries for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post. `pub_date` defaults to the insertion time.
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (text, author_id, group_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&input.text)
            .bind(input.author_id)
            .bind(input.group_id)
            .fetch_one(pool)
            .await
    }

    /// Find a post with its author and group by ID.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<PostDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the text and group of a post. Returns `None` if the id is unknown.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET text = $1, group_id = $2
             WHERE id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&input.text)
            .bind(input.group_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count posts matching the optional group and author filters.
    pub async fn count(
        pool: &PgPool,
        group_id: Option<DbId>,
        author_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM posts
             WHERE ($1::BIGINT IS NULL OR group_id = $1)
               AND ($2::BIGINT IS NULL OR author_id = $2)",
        )
        .bind(group_id)
        .bind(author_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// List one slice of posts matching the optional filters, newest first.
    pub async fn list(
        pool: &PgPool,
        group_id: Option<DbId>,
        author_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT}
             WHERE ($1::BIGINT IS NULL OR p.group_id = $1)
               AND ($2::BIGINT IS NULL OR p.author_id = $2)
             ORDER BY p.pub_date DESC, p.id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(group_id)
            .bind(author_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
