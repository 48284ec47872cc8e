//! Integration tests for `/auth/signup/` and `/auth/login/`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, build_test_app_with, get, get_as, location, post_json, test_config,
    token_for,
};
use serde_json::json;
use yatube_db::{MemoryStore, Store};

async fn signup(store: &Arc<MemoryStore>, username: &str, password: &str) -> StatusCode {
    post_json(
        build_test_app(store.clone()),
        "/auth/signup/",
        json!({ "username": username, "password": password }),
    )
    .await
    .status()
}

#[tokio::test]
async fn signup_creates_user_without_exposing_hash() {
    let store = Arc::new(MemoryStore::new());
    let response = post_json(
        build_test_app(store.clone()),
        "/auth/signup/",
        json!({ "username": "leo", "password": "long-enough-pw" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "leo");
    assert!(json["data"].get("password_hash").is_none());

    let user = store.find_user_by_username("leo").await.unwrap().unwrap();
    assert!(user.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn signup_rejects_bad_input() {
    let store = Arc::new(MemoryStore::new());

    assert_eq!(signup(&store, "", "long-enough-pw").await, StatusCode::BAD_REQUEST);
    assert_eq!(signup(&store, "has space", "long-enough-pw").await, StatusCode::BAD_REQUEST);
    assert_eq!(signup(&store, "leo", "short").await, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let store = Arc::new(MemoryStore::new());

    assert_eq!(signup(&store, "leo", "long-enough-pw").await, StatusCode::CREATED);
    assert_eq!(signup(&store, "leo", "another-password").await, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_returns_token_usable_for_create() {
    let store = Arc::new(MemoryStore::new());
    signup(&store, "leo", "long-enough-pw").await;

    let response = post_json(
        build_test_app(store.clone()),
        "/auth/login/",
        json!({ "username": "leo", "password": "long-enough-pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["username"], "leo");
    let token = json["access_token"].as_str().unwrap().to_string();

    let response = get_as(build_test_app(store), "/create/", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_with_wrong_credentials_is_unauthorized() {
    let store = Arc::new(MemoryStore::new());
    signup(&store, "leo", "long-enough-pw").await;

    for (username, password) in [("leo", "wrong-password"), ("nobody", "long-enough-pw")] {
        let response = post_json(
            build_test_app(store.clone()),
            "/auth/login/",
            json!({ "username": username, "password": password }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid username or password");
    }
}

#[tokio::test]
async fn login_redirect_target_echoes_next() {
    let store = Arc::new(MemoryStore::new());

    let response = get(build_test_app(store.clone()), "/create/").await;
    let target = location(&response);

    let json = body_json(get(build_test_app(store.clone()), &target).await).await;
    assert_eq!(json["data"]["next"], "/create/");
    assert!(json["data"]["current_user"].is_null());

    let json = body_json(get(build_test_app(store), "/auth/login/?next=//evil.example").await).await;
    assert_eq!(json["data"]["next"], "/");
}

#[tokio::test]
async fn login_page_reports_current_user() {
    let store = Arc::new(MemoryStore::new());
    let user = common::seed_user(&store, "leo").await;
    let token = token_for(&user);

    let json = body_json(get_as(build_test_app(store), "/auth/login/", Some(&token)).await).await;
    assert_eq!(json["data"]["current_user"], "leo");
    assert_eq!(json["data"]["next"], "/");
}

#[tokio::test]
async fn login_page_reports_configured_login_url() {
    let store = Arc::new(MemoryStore::new());
    let mut config = test_config();
    config.login_url = "/accounts/login/".to_string();

    let app = build_test_app_with(store.clone(), config.clone());
    let json = body_json(get(app, "/auth/login/").await).await;
    assert_eq!(json["data"]["login_endpoint"], "/accounts/login/");

    let response = get(build_test_app_with(store, config), "/create/").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/accounts/login/?next=/create/");
}
