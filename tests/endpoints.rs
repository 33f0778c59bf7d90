//! End-to-end CRUD against a real PostgreSQL named by `TEST_DATABASE_URL`.
//! Ignored by default: `TEST_DATABASE_URL=... cargo test -- --ignored`.
//! Tests share one database, so they run one at a time and start from empty tables.

mod common;

use axum::{
    http::{header, Method, StatusCode},
    Router,
};
use blogful_api::{app, apply_migrations};
use chrono::{DateTime, Utc};
use common::{send, state_with};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::{Mutex, MutexGuard};

static DB_LOCK: Mutex<()> = Mutex::new(());

struct Ctx {
    app: Router,
    pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

async fn setup() -> Ctx {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set for these tests");
    let guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to TEST_DATABASE_URL");
    apply_migrations(&pool).await.expect("migrations");
    sqlx::query("TRUNCATE blogful_comments, blogful_users, blogful_articles RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("truncate");
    Ctx {
        app: app(state_with(pool.clone())),
        pool,
        _guard: guard,
    }
}

async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let res = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(res.status, StatusCode::CREATED, "POST {uri}: {:?}", String::from_utf8_lossy(&res.body));
    res.json()
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn articles_lifecycle() {
    let ctx = setup().await;
    let app = &ctx.app;

    let res = send(app, Method::GET, "/api/articles", None).await;
    assert_eq!((res.status, res.json()), (StatusCode::OK, json!([])));

    let res = send(
        app,
        Method::POST,
        "/api/articles",
        Some(json!({ "title": "T", "style": "Listicle", "content": "C" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let created = res.json();
    let id = created["id"].as_i64().expect("id");
    assert_eq!(res.headers[header::LOCATION], format!("/api/articles/{}", id).as_str());
    assert_eq!((created["title"].as_str(), created["style"].as_str(), created["content"].as_str()), (Some("T"), Some("Listicle"), Some("C")));
    let published: DateTime<Utc> = created["date_published"].as_str().unwrap().parse().unwrap();
    assert!((Utc::now() - published).num_seconds().abs() < 60);

    let res = send(app, Method::GET, &format!("/api/articles/{}", id), None).await;
    assert_eq!((res.status, res.json()), (StatusCode::OK, created.clone()));

    let res = send(app, Method::PATCH, &format!("/api/articles/{}", id), Some(json!({ "irrelevant": "foo" }))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json()["error"]["message"],
        "Request body must contain either 'title', 'style' or 'content'"
    );

    let res = send(app, Method::PATCH, &format!("/api/articles/{}", id), Some(json!({ "title": "updated" }))).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.body.is_empty());
    let after = send(app, Method::GET, &format!("/api/articles/{}", id), None).await.json();
    let mut expected = created.clone();
    expected["title"] = json!("updated");
    assert_eq!(after, expected);

    let res = send(app, Method::DELETE, &format!("/api/articles/{}", id), None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let list = send(app, Method::GET, "/api/articles", None).await.json();
    assert_eq!(list, json!([]));

    for method in [Method::GET, Method::DELETE] {
        let res = send(app, method, &format!("/api/articles/{}", id), None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.json(), json!({ "error": { "message": "Article does not exist" } }));
    }
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn missing_ids_are_404_for_every_entity() {
    let ctx = setup().await;
    for (uri, message) in [
        ("/api/articles/123456", "Article does not exist"),
        ("/api/comments/123456", "Comment does not exist"),
        ("/api/users/123456", "User does not exist"),
    ] {
        let res = send(&ctx.app, Method::GET, uri, None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.json(), json!({ "error": { "message": message } }));
        let res = send(&ctx.app, Method::PATCH, uri, Some(json!({}))).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn script_payloads_are_scrubbed_on_every_read_path() {
    let ctx = setup().await;
    let app = &ctx.app;
    let malicious = json!({
        "title": r#"Naughty naughty very naughty <script>alert("xss");</script>"#,
        "style": "How-to",
        "content": r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#,
    });
    let check = |article: &Value| {
        let title = article["title"].as_str().unwrap();
        let content = article["content"].as_str().unwrap();
        assert!(!title.contains("<script"), "{title}");
        assert!(!content.contains("onerror"), "{content}");
        assert!(content.contains("<strong>all</strong>"));
    };

    let created = create(app, "/api/articles", malicious).await;
    check(&created);
    let id = created["id"].as_i64().unwrap();

    // Stored as sent; only responses are scrubbed.
    let (stored,): (String,) = sqlx::query_as("SELECT title FROM blogful_articles WHERE id = $1")
        .bind(id as i32)
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    assert!(stored.contains("<script>"));

    check(&send(app, Method::GET, &format!("/api/articles/{}", id), None).await.json());
    check(&send(app, Method::GET, "/api/articles", None).await.json()[0]);

    let user = create(
        app,
        "/api/users",
        json!({ "fullname": "<script>x()</script>Eve", "username": "eve", "nickname": "<b onclick=\"x()\">e</b>" }),
    )
    .await;
    assert_eq!(user["fullname"], "Eve");
    assert!(!user["nickname"].as_str().unwrap().contains("onclick"));

    let comment = create(
        app,
        "/api/comments",
        json!({ "text": "hi <script>steal()</script>", "article_id": id, "user_id": user["id"] }),
    )
    .await;
    assert!(!comment["text"].as_str().unwrap().contains("<script"));
    let listed = send(app, Method::GET, "/api/comments", None).await.json();
    assert!(!listed[0]["text"].as_str().unwrap().contains("<script"));
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn comments_lifecycle() {
    let ctx = setup().await;
    let app = &ctx.app;
    let article = create(app, "/api/articles", json!({ "title": "A", "style": "News", "content": "B" })).await;
    let user = create(app, "/api/users", json!({ "fullname": "Sam Gamgee", "username": "sam" })).await;

    let res = send(
        app,
        Method::POST,
        "/api/comments",
        Some(json!({
            "text": "First!",
            "article_id": article["id"],
            "user_id": user["id"],
            "date_commented": "2029-01-22T16:28:32.615Z",
        })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let comment = res.json();
    let id = comment["id"].as_i64().unwrap();
    assert_eq!(res.headers[header::LOCATION], format!("/api/comments/{}", id).as_str());
    let at: DateTime<Utc> = comment["date_commented"].as_str().unwrap().parse().unwrap();
    assert_eq!(at, "2029-01-22T16:28:32.615Z".parse::<DateTime<Utc>>().unwrap());
    assert_eq!((&comment["article_id"], &comment["user_id"]), (&article["id"], &user["id"]));

    let res = send(app, Method::PATCH, &format!("/api/comments/{}", id), Some(json!({ "article_id": 9 }))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"]["message"], "Request body must contain either text or date_commented");

    let res = send(app, Method::PATCH, &format!("/api/comments/{}", id), Some(json!({ "text": "Tom & Jerry" }))).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let after = send(app, Method::GET, &format!("/api/comments/{}", id), None).await.json();
    assert_eq!(after["text"], "Tom & Jerry");
    assert_eq!(after["date_commented"], comment["date_commented"]);

    let res = send(app, Method::DELETE, &format!("/api/comments/{}", id), None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(send(app, Method::GET, "/api/comments", None).await.json(), json!([]));
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL"]
async fn user_passwords_are_hashed_and_never_returned() {
    let ctx = setup().await;
    let app = &ctx.app;
    let res = send(
        app,
        Method::POST,
        "/api/users",
        Some(json!({ "fullname": "Frodo Baggins", "username": "frodo", "nickname": "Mr. Underhill", "password": "ring" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let user = res.json();
    assert!(user.get("password").is_none());
    assert!(user["date_created"].is_string());
    let id = user["id"].as_i64().unwrap() as i32;

    let stored_password = |pool: PgPool| async move {
        let (pw,): (Option<String>,) = sqlx::query_as("SELECT password FROM blogful_users WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        pw.expect("password stored")
    };
    let hash = stored_password(ctx.pool.clone()).await;
    assert_ne!(hash, "ring");
    assert!(bcrypt::verify("ring", &hash).unwrap());

    for body in [json!({}), json!({ "email": "frodo@shire.com" }), json!({ "nickname": "" })] {
        let res = send(app, Method::PATCH, &format!("/api/users/{}", id), Some(body)).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            res.json()["error"]["message"],
            "Request body must contain either fullname, username, nickname, or password"
        );
    }

    let res = send(app, Method::PATCH, &format!("/api/users/{}", id), Some(json!({ "password": "mithril" }))).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let hash = stored_password(ctx.pool.clone()).await;
    assert!(bcrypt::verify("mithril", &hash).unwrap());

    let after = send(app, Method::GET, &format!("/api/users/{}", id), None).await.json();
    assert_eq!(after, user);
    let all = send(app, Method::GET, "/api/users", None).await.json();
    assert!(all[0].get("password").is_none());
}
