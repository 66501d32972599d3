use std::sync::Arc;

use stillwater_genai::GenAiClient;

use crate::config::ServerConfig;
use crate::store::progress::PgProgressStore;
use crate::sync::ProgressTracker;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stillwater_db::DbPool,
    /// Server configuration (session settings are read by the middleware).
    pub config: Arc<ServerConfig>,
    /// Per-user progress snapshots and their debounced sync.
    pub progress: Arc<ProgressTracker>,
    /// Generative-AI client.
    pub genai: GenAiClient,
}

impl AppState {
    /// Wire up state from a pool and configuration.
    pub fn new(pool: stillwater_db::DbPool, config: ServerConfig) -> Self {
        let store = Arc::new(PgProgressStore::new(pool.clone()));
        let progress = Arc::new(ProgressTracker::new(store, config.progress_sync_delay));
        let genai = GenAiClient::new(config.genai.clone());

        Self {
            pool,
            config: Arc::new(config),
            progress,
            genai,
        }
    }
}
