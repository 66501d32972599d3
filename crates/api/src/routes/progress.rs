//! Route definitions for the `/progress` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Routes mounted at `/progress`.
///
/// ```text
/// GET  /week               -> past_week
/// POST /{date}/habit       -> log_habit
/// POST /{date}/meditation  -> log_meditation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/week", get(progress::past_week))
        .route("/{date}/habit", post(progress::log_habit))
        .route("/{date}/meditation", post(progress::log_meditation))
}
