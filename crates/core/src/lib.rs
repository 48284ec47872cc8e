//! Domain rules for the Yatube publishing service.
//!
//! This crate has no I/O: it holds the error taxonomy, the post validator,
//! the edit authorization gate and the pagination arithmetic shared by every
//! feed. Storage lives in `yatube-db`, HTTP in `yatube-api`.

pub mod error;
pub mod pagination;
pub mod posts;
pub mod types;
pub mod users;
