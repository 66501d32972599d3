//! Journal entry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stillwater_core::types::{DbId, Timestamp};

/// A row from the `journal_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JournalEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub mood: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for saving a new journal entry.
#[derive(Debug, Deserialize)]
pub struct CreateJournalEntry {
    pub content: String,
    pub mood: Option<String>,
}
