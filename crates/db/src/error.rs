use yatube_core::error::CoreError;

/// Failure returned by any [`Store`](crate::store::Store) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain error such as an unknown slug or a duplicate username.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A PostgreSQL error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
