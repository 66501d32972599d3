use std::time::Duration;

use stillwater_genai::GenAiConfig;

use crate::auth::session_token::SessionConfig;
use crate::sync::DEFAULT_SYNC_DELAY;

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Quiet period before a progress update is written (default: 1s).
    pub progress_sync_delay: Duration,
    /// Session token signing and cookie settings.
    pub session: SessionConfig,
    /// Generative-AI service connection.
    pub genai: GenAiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `PROGRESS_SYNC_DELAY_MS` | `1000`                  |
    ///
    /// Session and AI settings are read by [`SessionConfig::from_env`] and
    /// [`GenAiConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let progress_sync_delay = std::env::var("PROGRESS_SYNC_DELAY_MS")
            .ok()
            .map(|v| {
                v.parse::<u64>()
                    .map(Duration::from_millis)
                    .expect("PROGRESS_SYNC_DELAY_MS must be a valid u64")
            })
            .unwrap_or(DEFAULT_SYNC_DELAY);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            progress_sync_delay,
            session: SessionConfig::from_env(),
            genai: GenAiConfig::from_env(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
