//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod group_repo;
pub mod post_repo;
pub mod user_repo;

pub use group_repo::GroupRepo;
pub use post_repo::PostRepo;
pub use user_repo::UserRepo;
