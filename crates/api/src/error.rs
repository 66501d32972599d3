use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stillwater_core::error::CoreError;
use stillwater_genai::GenAiError;

use crate::i18n::Locale;

/// Error returned by handlers; renders as `{"error": message, "code": CODE}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Raw sqlx failure from a handler that talks to a repository directly.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An AI flow failed. Shown to the user as a localized message only.
    #[error("AI error: {source}")]
    Ai {
        source: GenAiError,
        locale: Locale,
    },

    /// A JSON body that could not be read or did not match the expected shape.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Handler result.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Wrap an AI failure for the caller's locale.
    pub fn ai(source: GenAiError, locale: Locale) -> Self {
        Self::Ai { source, locale }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                // Logged where the write failed; the message is user-safe.
                CoreError::Persistence(msg) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    msg.clone(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    sanitized_500()
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Ai { source, locale } => classify_ai_error(source, *locale),

            // Keeps axum's status: 400 syntax, 415 content type, 422 shape.
            AppError::Json(rejection) => {
                (rejection.status(), "VALIDATION_ERROR", rejection.body_text())
            }

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                sanitized_500()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an AI failure.
///
/// Input rejected before the call is the caller's fault (400). Everything
/// else, including a missing API key, is reported as the service being
/// unavailable (502) with a localized message.
fn classify_ai_error(err: &GenAiError, locale: Locale) -> (StatusCode, &'static str, String) {
    match err {
        GenAiError::InvalidInput(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        GenAiError::NotConfigured => {
            tracing::error!("AI request made but no GENAI_API_KEY is configured");
            ai_unavailable(locale)
        }
        other => {
            tracing::error!(error = %other, "AI flow failed");
            ai_unavailable(locale)
        }
    }
}

fn ai_unavailable(locale: Locale) -> (StatusCode, &'static str, String) {
    (
        StatusCode::BAD_GATEWAY,
        "AI_UNAVAILABLE",
        locale.ai_unavailable().to_string(),
    )
}

/// 500 with a generic message. The cause is logged by the caller.
fn sanitized_500() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map a sqlx error to status, code and message.
///
/// `RowNotFound` is a 404 and `uq_*` unique violations are a 409. The rest
/// are logged and reported as a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // 23505 = unique_violation
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint == "uq_users_email" {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        "An account with this email already exists".to_string(),
                    );
                }
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            sanitized_500()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            sanitized_500()
        }
    }
}
