//! Persistence for users, groups and posts.
//!
//! The [`store::Store`] trait is the only interface the HTTP layer sees.
//! [`store::PgStore`] backs it with PostgreSQL through the zero-sized
//! repositories in [`repositories`]; [`memory::MemoryStore`] backs it with
//! process memory for tests and database-less development runs.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod feed;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{FeedScope, PgStore, Store};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
