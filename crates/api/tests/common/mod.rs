#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use stillwater_api::auth::session_token::{issue_session_token, SessionConfig};
use stillwater_api::config::ServerConfig;
use stillwater_api::router::build_app_router;
use stillwater_api::state::AppState;
use stillwater_genai::GenAiConfig;

/// Address nothing listens on; connections are refused immediately.
pub const UNREACHABLE: &str = "127.0.0.1:1";

pub const TEST_SECRET: &str = "integration-test-secret-long-enough-for-hs256";

pub fn session_config() -> SessionConfig {
    SessionConfig {
        secret: TEST_SECRET.to_string(),
        expiry_days: 5,
        cookie_secure: false,
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// The AI service points at [`UNREACHABLE`] with a dummy key, so AI flows
/// fail with a transport error.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        progress_sync_delay: Duration::from_millis(50),
        session: session_config(),
        genai: GenAiConfig {
            api_key: Some("test-key".to_string()),
            base_url: format!("http://{UNREACHABLE}"),
            model: "test-model".to_string(),
        },
    }
}

/// A pool that never connects, for exercising the degradation policy.
///
/// Must be called from inside a Tokio runtime.
pub fn unreachable_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy(&format!("postgres://stillwater:stillwater@{UNREACHABLE}/stillwater"))
        .expect("lazy pool URL must parse")
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Router backed by [`unreachable_pool`].
pub fn offline_app() -> Router {
    build_test_app(unreachable_pool())
}

/// A valid session token for `user_id`, signed with the test secret.
pub fn session_token(user_id: i64) -> String {
    issue_session_token(user_id, "tester@example.com", None, &session_config())
        .expect("token generation should succeed")
}

/// `Cookie` header value carrying a valid session for `user_id`.
pub fn session_cookie(user_id: i64) -> String {
    format!("session={}", session_token(user_id))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a JSON body with the given method, authenticated with `cookie`.
pub async fn json_with_cookie(
    app: Router,
    method: Method,
    uri: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(COOKIE, cookie)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// All `Set-Cookie` values on a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("location")
        .map(|v| v.to_str().unwrap())
}
