//! Root-level routes: the landing redirect, the dashboard and the auth forms.

use axum::routing::get;
use axum::Router;

use crate::handlers::{auth, dashboard};
use crate::state::AppState;

/// ```text
/// GET  /               -> 307 /dashboard
/// GET  /dashboard      -> dashboard summary
/// GET  /auth/login     -> sign-in form
/// POST /auth/login     -> sign in
/// GET  /auth/register  -> sign-up form
/// POST /auth/register  -> create account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::root))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/register", get(auth::register_page).post(auth::register))
}
