#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use yatube_api::auth::jwt::{generate_access_token, JwtConfig};
use yatube_api::config::ServerConfig;
use yatube_api::router::build_app_router;
use yatube_api::state::AppState;
use yatube_db::models::group::{CreateGroup, Group};
use yatube_db::models::post::{CreatePost, Post};
use yatube_db::models::user::{CreateUser, User};
use yatube_db::{MemoryStore, Store};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        login_url: "/auth/login/".to_string(),
        posts_per_page: 10,
        title_max_chars: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_test_app_with(store, test_config())
}

/// Like [`build_test_app`], with a caller-supplied config.
pub fn build_test_app_with(store: Arc<MemoryStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn with_token(
    builder: axum::http::request::Builder,
    token: Option<&str>,
) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

/// Anonymous GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_as(app, uri, None).await
}

/// GET, optionally carrying a bearer token.
pub async fn get_as(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let request = with_token(Request::builder().method(Method::GET).uri(uri), token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, body: &str, token: Option<&str>) -> Response<Body> {
    let request = with_token(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded"),
        token,
    )
    .body(Body::from(body.to_string()))
    .unwrap();
    send(app, request).await
}

/// POST a JSON body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    post_json_as(app, uri, body, None).await
}

/// POST a JSON body, optionally carrying a bearer token.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    body: Value,
    token: Option<&str>,
) -> Response<Body> {
    let request = with_token(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json"),
        token,
    )
    .body(Body::from(body.to_string()))
    .unwrap();
    send(app, request).await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn seed_user(store: &MemoryStore, username: &str) -> User {
    store
        .create_user(&CreateUser {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .unwrap()
}

pub async fn seed_group(store: &MemoryStore, title: &str, slug: &str) -> Group {
    store
        .create_group(&CreateGroup {
            title: title.to_string(),
            slug: slug.to_string(),
            description: format!("{title} description"),
        })
        .await
        .unwrap()
}

pub async fn seed_post(
    store: &MemoryStore,
    author: &User,
    text: &str,
    group: Option<&Group>,
) -> Post {
    store
        .create_post(&CreatePost {
            author_id: author.id,
            text: text.to_string(),
            group_id: group.map(|g| g.id),
        })
        .await
        .unwrap()
}

/// Access token for `user`, signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.username, &test_config().jwt).unwrap()
}
