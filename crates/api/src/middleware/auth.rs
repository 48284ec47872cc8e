//! JWT-based identity extractors for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::header::AUTHORIZATION;
use axum::response::{IntoResponse, Response};
use yatube_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::response::found;
use crate::state::AppState;
use crate::urls::login_redirect;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
}

/// Decode the bearer token, if any. Missing, malformed and expired tokens
/// all yield `None`.
fn identity_from_parts(parts: &Parts, state: &AppState) -> Option<AuthUser> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    match validate_token(token, &state.config.jwt) {
        Ok(claims) => Some(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        }),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid access token");
            None
        }
    }
}

/// The requester's identity; `None` for anonymous requests. Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(identity_from_parts(parts, state)))
    }
}

/// Requires an authenticated user.
///
/// Anonymous requests are answered with a `302` to the configured login URL
/// whose `next` parameter is the path (and query) originally requested.
///
/// ```ignore
/// async fn create(RequireLogin(user): RequireLogin) -> AppResult<Response> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(found("/"))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireLogin(pub AuthUser);

/// Rejection produced by [`RequireLogin`].
#[derive(Debug)]
pub struct LoginRedirect {
    pub location: String,
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        found(&self.location)
    }
}

impl FromRequestParts<AppState> for RequireLogin {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match identity_from_parts(parts, state) {
            Some(user) => Ok(RequireLogin(user)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or_else(|| parts.uri.path());
                tracing::debug!(next, "Anonymous request redirected to login");
                Err(LoginRedirect {
                    location: login_redirect(&state.config.login_url, next),
                })
            }
        }
    }
}
