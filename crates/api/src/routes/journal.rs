//! Route definitions for the `/journal` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::journal;
use crate::state::AppState;

/// Routes mounted at `/journal`.
///
/// ```text
/// GET    /          -> list_entries
/// POST   /          -> create_entry
/// DELETE /{id}      -> delete_entry
/// POST   /analysis  -> analyze_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(journal::list_entries).post(journal::create_entry))
        .route("/{id}", delete(journal::delete_entry))
        .route("/analysis", post(journal::analyze_entry))
}
