//! End-to-end account and data flows against a real database.
//!
//! Run with `DATABASE_URL` set and `--ignored`.

mod common;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get_with_cookie, json_with_cookie, location, send, set_cookies};
use serde_json::json;
use sqlx::PgPool;

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Pull `session=<token>` out of a `Set-Cookie` header.
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn register_sets_session_and_redirects(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send(
        app.clone(),
        form(
            "/auth/register",
            "email=River%40example.com&password=long-enough&display_name=River",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].contains("HttpOnly"));

    let response = get_with_cookie(app, "/api/v1/profile", &cookie_pair(&cookies[0])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "river@example.com");
    assert_eq!(json["data"]["display_name"], "River");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_email_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = "email=dup%40example.com&password=long-enough";

    let first = send(app.clone(), form("/auth/register", body)).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let second = send(app, form("/auth/register", body)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn short_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send(app, form("/auth/register", "email=a%40example.com&password=short")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn login_checks_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    send(
        app.clone(),
        form("/auth/register", "email=calm%40example.com&password=long-enough"),
    )
    .await;

    let wrong = send(
        app.clone(),
        form("/auth/login", "email=calm%40example.com&password=not-the-one"),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let right = send(
        app,
        form("/auth/login", "email=CALM%40example.com&password=long-enough"),
    )
    .await;
    assert_eq!(right.status(), StatusCode::SEE_OTHER);
    assert_eq!(set_cookies(&right).len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn journal_entries_are_private(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut cookies = Vec::new();
    for email in ["one%40example.com", "two%40example.com"] {
        let response = send(
            app.clone(),
            form("/auth/register", &format!("email={email}&password=long-enough")),
        )
        .await;
        cookies.push(cookie_pair(&set_cookies(&response)[0]));
    }

    let response = json_with_cookie(
        app.clone(),
        Method::POST,
        "/api/v1/journal",
        &cookies[0],
        json!({ "content": "First entry", "mood": "happy" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let foreign_delete = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/v1/journal/{id}"))
        .header(COOKIE, &cookies[1])
        .body(Body::empty())
        .unwrap();
    assert_eq!(
        send(app.clone(), foreign_delete).await.status(),
        StatusCode::NOT_FOUND
    );

    let response = get_with_cookie(app.clone(), "/api/v1/journal", &cookies[1]).await;
    assert_eq!(body_json(response).await["data"], json!([]));

    let response = get_with_cookie(app, "/api/v1/journal", &cookies[0]).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["content"], "First entry");
    assert_eq!(json["data"][0]["mood"], "happy");
}
