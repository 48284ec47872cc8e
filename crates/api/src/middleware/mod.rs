//! Identity extractors.
//!
//! - [`auth::AuthUser`] -- The user behind a valid JWT Bearer token.
//! - [`auth::MaybeUser`] -- The requester's identity, possibly anonymous.
//! - [`auth::RequireLogin`] -- Requires an identity; anonymous requests are
//!   redirected to the login entry point.

pub mod auth;
