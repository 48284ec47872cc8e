//! Integration tests for `GET /posts/{post_id}/`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_as, seed_group, seed_post, seed_user, token_for};
use yatube_db::MemoryStore;

#[tokio::test]
async fn detail_shows_post_title_and_author_count() {
    let store = Arc::new(MemoryStore::new());
    let author = seed_user(&store, "leo").await;
    let group = seed_group(&store, "Cats", "cats").await;
    let long_text = "Тестовый пост, который заметно длиннее тридцати символов";
    let post = seed_post(&store, &author, long_text, Some(&group)).await;
    seed_post(&store, &author, "second", None).await;

    let response = get(build_test_app(store), &format!("/posts/{}/", post.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["post"]["id"], post.id);
    assert_eq!(data["post"]["text"], long_text);
    assert_eq!(data["post"]["author_username"], "leo");
    assert_eq!(data["post"]["group_title"], "Cats");
    assert_eq!(data["author_posts_count"], 2);

    let title = data["title"].as_str().unwrap();
    assert_eq!(title.chars().count(), 30);
    assert!(long_text.starts_with(title));
}

#[tokio::test]
async fn short_text_is_whole_title() {
    let store = Arc::new(MemoryStore::new());
    let author = seed_user(&store, "leo").await;
    let post = seed_post(&store, &author, "short", None).await;

    let json = body_json(get(build_test_app(store), &format!("/posts/{}/", post.id)).await).await;
    assert_eq!(json["data"]["title"], "short");
    assert!(json["data"]["post"]["group_id"].is_null());
}

#[tokio::test]
async fn edit_link_only_for_author() {
    let store = Arc::new(MemoryStore::new());
    let author = seed_user(&store, "leo").await;
    let other = seed_user(&store, "other").await;
    let post = seed_post(&store, &author, "text", None).await;
    let uri = format!("/posts/{}/", post.id);

    let json = body_json(get(build_test_app(store.clone()), &uri).await).await;
    assert!(json["data"]["edit_url"].is_null());

    let token = token_for(&other);
    let json = body_json(get_as(build_test_app(store.clone()), &uri, Some(&token)).await).await;
    assert!(json["data"]["edit_url"].is_null());

    let token = token_for(&author);
    let json = body_json(get_as(build_test_app(store), &uri, Some(&token)).await).await;
    assert_eq!(json["data"]["edit_url"], format!("/posts/{}/edit/", post.id));
}

#[tokio::test]
async fn unknown_or_malformed_id_returns_404() {
    let store = Arc::new(MemoryStore::new());

    for uri in ["/posts/999/", "/posts/abc/"] {
        let response = get(build_test_app(store.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
    }
}
