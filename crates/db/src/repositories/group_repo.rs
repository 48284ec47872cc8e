//! Repository for the `groups` table.

use sqlx::PgPool;
use yatube_core::types::DbId;

use crate::models::group::{CreateGroup, Group};

const COLUMNS: &str = "id, title, slug, description";

/// Provides read access to groups, plus creation for provisioning and tests.
pub struct GroupRepo;

impl GroupRepo {
    pub async fn create(pool: &PgPool, input: &CreateGroup) -> Result<Group, sqlx::Error> {
        let query = format!(
            "INSERT INTO groups (title, slug, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups WHERE id = $1");
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups WHERE slug = $1");
        sqlx::query_as::<_, Group>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all groups ordered by title, for the post form's group choices.
    pub async fn list(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups ORDER BY title ASC, id ASC");
        sqlx::query_as::<_, Group>(&query).fetch_all(pool).await
    }
}
