//! Request extractors whose rejections use the API error envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with malformed or mistyped bodies reported as
/// `{"error", "code": "VALIDATION_ERROR"}` instead of plain text.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
