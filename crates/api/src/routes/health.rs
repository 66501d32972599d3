use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether an AI API key is configured.
    pub ai_configured: bool,
    /// Progress updates still waiting to be synced.
    pub pending_progress_writes: usize,
}

/// GET /health -- returns service and dependency health.
///
/// Bypassed by the session middleware.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = stillwater_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        ai_configured: state.genai.is_configured(),
        pending_progress_writes: state.progress.pending_writes().await,
    })
}

/// Mount health check routes (root level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
