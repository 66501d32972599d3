//! Route definitions for session endpoints under `/api/v1`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// GET  /session      -> current session claims
/// POST /auth/logout  -> clear session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", get(auth::current_session))
        .route("/auth/logout", post(auth::logout))
}
