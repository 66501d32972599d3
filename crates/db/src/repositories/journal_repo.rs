//! Repository for the `journal_entries` table.

use sqlx::PgPool;
use stillwater_core::types::DbId;

use crate::models::journal::{CreateJournalEntry, JournalEntry};

const COLUMNS: &str = "id, user_id, content, mood, created_at";

pub struct JournalRepo;

impl JournalRepo {
    /// Insert a new entry, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateJournalEntry,
    ) -> Result<JournalEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO journal_entries (user_id, content, mood) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JournalEntry>(&query)
            .bind(user_id)
            .bind(&input.content)
            .bind(&input.mood)
            .fetch_one(pool)
            .await
    }

    /// List a user's entries, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<JournalEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM journal_entries \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, JournalEntry>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The user's `limit` most recent entries, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<JournalEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM journal_entries \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, JournalEntry>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Delete one of the user's entries.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
