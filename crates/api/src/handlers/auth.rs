//! Handlers for the `/auth` resource (signup, login).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use yatube_core::error::CoreError;
use yatube_core::users::{validate_password_strength, validate_username};
use yatube_db::models::user::{CreateUser, UserResponse};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::query::NextParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::urls::index_path;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup/`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/login/`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// What a client needs to render the login screen.
#[derive(Debug, Serialize)]
pub struct LoginPage {
    /// Where to POST credentials.
    pub login_endpoint: String,
    /// Where to go once logged in.
    pub next: String,
    /// Username of the current requester, if already logged in.
    pub current_user: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/signup/
///
/// Register a new account. Usernames are unique.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    validate_username(&input.username)?;
    validate_password_strength(&input.password)?;

    if state
        .store
        .find_user_by_username(&input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Username '{}' is already taken",
            input.username
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .store
        .create_user(&CreateUser {
            username: input.username,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// POST /auth/login/
///
/// Authenticate with username + password. Returns an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = state
        .store
        .find_user_by_username(&input.username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected");
        return Err(invalid());
    }

    let access_token = generate_access_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(&user),
    }))
}

/// GET /auth/login/?next=
///
/// Target of the login redirect. Echoes `next` so the client can return
/// there after logging in.
pub async fn login_page(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    Query(params): Query<NextParams>,
) -> Json<DataResponse<LoginPage>> {
    let next = params
        .next
        .filter(|n| n.starts_with('/') && !n.starts_with("//"))
        .unwrap_or_else(index_path);

    Json(DataResponse {
        data: LoginPage {
            login_endpoint: state.config.login_url.clone(),
            next,
            current_user: user.map(|u| u.username),
        },
    })
}
