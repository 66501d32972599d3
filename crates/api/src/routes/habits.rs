//! Route definitions for the `/habits` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::habits;
use crate::state::AppState;

/// Routes mounted at `/habits`.
///
/// ```text
/// GET /{date}  -> list_habits
/// PUT /{date}  -> replace_habits
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{date}",
        get(habits::list_habits).put(habits::replace_habits),
    )
}
