//! Group (community) model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yatube_core::types::DbId;

/// A row from the `groups` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Group {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// DTO for creating a group. Groups are provisioned outside the HTTP API.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroup {
    pub title: String,
    pub slug: String,
    pub description: String,
}
