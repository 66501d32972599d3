//! User-scoped data accessors over the repositories.
//!
//! Reads never fail: a store error is logged and the caller gets an empty
//! value (`[]`, `None`, or a zero-filled week). Writes log the cause and
//! return [`CoreError::Persistence`] with a message safe to show users.

pub mod habits;
pub mod journal;
pub mod profile;
pub mod progress;

use stillwater_core::error::CoreError;

/// Log a failed write and convert it into the user-facing persistence error.
fn persistence_error(what: &'static str, err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, what, "Store write failed");
    CoreError::Persistence(format!("{what} could not be saved"))
}
