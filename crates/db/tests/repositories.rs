//! Integration tests for the PostgreSQL repositories and [`PgStore`].
//!
//! Exercises the SQL layer against a real database:
//! - Feed ordering and filtering
//! - Unique constraint violations
//! - Foreign key behaviour on group deletion
//!
//! Run with `DATABASE_URL` set and `--ignored`.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use yatube_db::models::group::CreateGroup;
use yatube_db::models::post::{CreatePost, UpdatePost};
use yatube_db::models::user::CreateUser;
use yatube_db::repositories::{GroupRepo, PostRepo, UserRepo};
use yatube_db::{FeedScope, PgStore, Store};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password_hash: "x".to_string(),
    }
}

fn new_group(slug: &str) -> CreateGroup {
    CreateGroup {
        title: format!("Group {slug}"),
        slug: slug.to_string(),
        description: String::new(),
    }
}

fn new_post(author_id: i64, text: &str, group_id: Option<i64>) -> CreatePost {
    CreatePost {
        author_id,
        text: text.to_string(),
        group_id,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn feed_is_newest_first_and_scoped(pool: PgPool) {
    let leo = UserRepo::create(&pool, &new_user("leo")).await.unwrap();
    let ann = UserRepo::create(&pool, &new_user("ann")).await.unwrap();
    let cats = GroupRepo::create(&pool, &new_group("cats")).await.unwrap();

    let first = PostRepo::create(&pool, &new_post(leo.id, "first", Some(cats.id)))
        .await
        .unwrap();
    let second = PostRepo::create(&pool, &new_post(ann.id, "second", None))
        .await
        .unwrap();
    assert!(second.pub_date >= first.pub_date);

    let all = PostRepo::list(&pool, None, None, 10, 0).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].text, "second");
    assert_eq!(all[1].group_slug.as_deref(), Some("cats"));

    assert_eq!(PostRepo::count(&pool, Some(cats.id), None).await.unwrap(), 1);
    assert_eq!(PostRepo::count(&pool, None, Some(ann.id)).await.unwrap(), 1);
    assert_eq!(
        PostRepo::list(&pool, None, Some(leo.id), 10, 0)
            .await
            .unwrap()[0]
            .author_username,
        "leo"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn equal_pub_dates_break_ties_by_id(pool: PgPool) {
    let leo = UserRepo::create(&pool, &new_user("leo")).await.unwrap();
    let a = PostRepo::create(&pool, &new_post(leo.id, "a", None)).await.unwrap();
    let b = PostRepo::create(&pool, &new_post(leo.id, "b", None)).await.unwrap();

    let same = Utc::now() - Duration::hours(1);
    sqlx::query("UPDATE posts SET pub_date = $1")
        .bind(same)
        .execute(&pool)
        .await
        .unwrap();

    let ids: Vec<i64> = PostRepo::list(&pool, None, None, 10, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, [a.id, b.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_username_and_slug_fail(pool: PgPool) {
    UserRepo::create(&pool, &new_user("leo")).await.unwrap();
    let err = UserRepo::create(&pool, &new_user("leo")).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_users_username"));

    GroupRepo::create(&pool, &new_group("cats")).await.unwrap();
    let err = GroupRepo::create(&pool, &new_group("cats")).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_groups_slug"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn deleting_group_keeps_its_posts(pool: PgPool) {
    let leo = UserRepo::create(&pool, &new_user("leo")).await.unwrap();
    let cats = GroupRepo::create(&pool, &new_group("cats")).await.unwrap();
    let post = PostRepo::create(&pool, &new_post(leo.id, "meow", Some(cats.id)))
        .await
        .unwrap();

    sqlx::query("DELETE FROM groups WHERE id = $1")
        .bind(cats.id)
        .execute(&pool)
        .await
        .unwrap();

    let detail = PostRepo::find_detail(&pool, post.id).await.unwrap().unwrap();
    assert_eq!(detail.group_id, None);
    assert_eq!(detail.group_title, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn pg_store_update_keeps_author(pool: PgPool) {
    let store = PgStore::new(pool);
    let leo = store.create_user(&new_user("leo")).await.unwrap();
    let post = store.create_post(&new_post(leo.id, "draft", None)).await.unwrap();

    let updated = store
        .update_post(
            post.id,
            &UpdatePost {
                text: "final".into(),
                group_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.author_id, leo.id);
    assert_eq!(updated.pub_date, post.pub_date);

    assert!(store
        .update_post(
            post.id + 100,
            &UpdatePost {
                text: "x".into(),
                group_id: None,
            },
        )
        .await
        .is_err());
    assert_eq!(store.count_posts(FeedScope::Author(leo.id)).await.unwrap(), 1);
    store.ping().await.unwrap();
}
