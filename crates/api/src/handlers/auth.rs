//! Handlers for sign-up, sign-in and sign-out.
//!
//! The form endpoints live in the `/auth` zone, so the session middleware only
//! lets them through for visitors without a valid session.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::Deserialize;
use stillwater_core::error::CoreError;
use stillwater_db::models::user::{CreateUser, User};
use stillwater_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::password::{check_password_length, hash_password, verify_password, MIN_PASSWORD_LENGTH};
use crate::auth::session_token::issue_session_token;
use crate::error::{AppError, AppResult};
use crate::middleware::route_zone::DASHBOARD_PATH;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::store::profile::get_user_profile;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Form body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Form body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /auth/login
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

/// GET /auth/register
pub async fn register_page() -> Html<String> {
    Html(REGISTER_HTML.replace("{min}", &MIN_PASSWORD_LENGTH.to_string()))
}

const LOGIN_HTML: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign in · Stillwater</title></head>
<body>
<form method="post" action="/auth/login">
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Sign in</button>
</form>
<p><a href="/auth/register">Create an account</a></p>
</body>
</html>
"#;

const REGISTER_HTML: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Create account · Stillwater</title></head>
<body>
<form method="post" action="/auth/register">
  <label>Name <input type="text" name="display_name"></label>
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" minlength="{min}" required></label>
  <button type="submit">Create account</button>
</form>
<p><a href="/auth/login">Already have an account?</a></p>
</body>
</html>
"#;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/register
///
/// Create an account and its profile, then sign the new user in.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    form.validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    check_password_length(&form.password)?;

    let password_hash = hash_password(&form.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        email: form.email.trim().to_lowercase(),
        password_hash,
    };
    let display_name = form
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    // A taken email surfaces as `uq_users_email` and maps to 409.
    let user = UserRepo::create_with_profile(&state.pool, &input, display_name).await?;
    tracing::info!(user_id = user.id, "Account created");

    start_session(&state, &user, None)
}

/// POST /auth/login
///
/// Verify credentials and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, form.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&form.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected sign-in attempt");
        return Err(invalid());
    }

    let picture = get_user_profile(&state.pool, user.id)
        .await
        .and_then(|p| p.photo_url);

    tracing::info!(user_id = user.id, "Signed in");
    start_session(&state, &user, picture.as_deref())
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookie and drop the user's in-memory progress. Pending
/// progress writes still go out. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, user: SessionUser) -> impl IntoResponse {
    state.progress.forget_user(user.user_id).await;
    tracing::info!(user_id = user.user_id, "Signed out");

    (StatusCode::NO_CONTENT, [(SET_COOKIE, clear_session_cookie())])
}

/// GET /api/v1/session
///
/// The verified identity carried by the session cookie.
pub async fn current_session(user: SessionUser) -> Json<DataResponse<SessionUser>> {
    Json(DataResponse { data: user })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token for `user` and redirect to the dashboard with it set.
fn start_session(state: &AppState, user: &User, picture: Option<&str>) -> AppResult<Response> {
    let token = issue_session_token(user.id, &user.email, picture, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = session_cookie(&token, &state.config.session);
    Ok(([(SET_COOKIE, cookie)], Redirect::to(DASHBOARD_PATH)).into_response())
}
