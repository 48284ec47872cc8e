//! Row models and input DTOs.

pub mod group;
pub mod post;
pub mod user;
