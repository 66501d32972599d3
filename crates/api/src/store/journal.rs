use stillwater_core::error::CoreError;
use stillwater_core::types::DbId;
use stillwater_db::models::journal::{CreateJournalEntry, JournalEntry};
use stillwater_db::repositories::JournalRepo;
use stillwater_db::DbPool;

use super::persistence_error;

/// All of the user's entries, newest first. Empty on read failure.
pub async fn get_journal_entries(pool: &DbPool, user_id: DbId) -> Vec<JournalEntry> {
    match JournalRepo::list_for_user(pool, user_id).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Could not load journal entries");
            Vec::new()
        }
    }
}

/// The user's `limit` newest entries. Empty on read failure.
pub async fn get_recent_journal_entries(
    pool: &DbPool,
    user_id: DbId,
    limit: i64,
) -> Vec<JournalEntry> {
    match JournalRepo::list_recent(pool, user_id, limit).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Could not load recent journal entries");
            Vec::new()
        }
    }
}

pub async fn save_journal_entry(
    pool: &DbPool,
    user_id: DbId,
    input: &CreateJournalEntry,
) -> Result<JournalEntry, CoreError> {
    if input.content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Journal entry must not be empty".into(),
        ));
    }

    let entry = JournalRepo::create(pool, user_id, input)
        .await
        .map_err(|e| persistence_error("Journal entry", e))?;

    tracing::info!(user_id, entry_id = entry.id, "Journal entry saved");
    Ok(entry)
}

/// Delete one of the user's entries. Someone else's entry is reported as
/// not found.
pub async fn delete_journal_entry(pool: &DbPool, user_id: DbId, id: DbId) -> Result<(), CoreError> {
    let deleted = JournalRepo::delete(pool, user_id, id)
        .await
        .map_err(|e| persistence_error("Journal entry", e))?;

    if !deleted {
        return Err(CoreError::NotFound {
            entity: "JournalEntry",
            id,
        });
    }

    tracing::info!(user_id, entry_id = id, "Journal entry deleted");
    Ok(())
}
