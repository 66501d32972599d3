pub mod auth;
pub mod habits;
pub mod health;
pub mod journal;
pub mod pages;
pub mod progress;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{profile, recommendations};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every route here requires a session; the session middleware redirects
/// anonymous requests before they arrive.
///
/// ```text
/// /session                                 current session (GET)
/// /auth/logout                             sign out (POST)
///
/// /habits/{date}                           get, replace (GET, PUT)
///
/// /journal                                 list, create (GET, POST)
/// /journal/{id}                            delete (DELETE)
/// /journal/analysis                        AI analysis (POST)
///
/// /progress/week                           past seven days (GET)
/// /progress/{date}/habit                   log habit toggle (POST)
/// /progress/{date}/meditation              log minutes (POST)
///
/// /profile                                 get, update (GET, PATCH)
///
/// /recommendations                         AI session recommendation (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/habits", habits::router())
        .nest("/journal", journal::router())
        .nest("/progress", progress::router())
        .route(
            "/profile",
            get(profile::get_profile).patch(profile::update_profile),
        )
        .route("/recommendations", post(recommendations::recommend_session))
}
