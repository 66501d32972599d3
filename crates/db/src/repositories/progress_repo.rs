//! Repository for the `daily_progress` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use stillwater_core::progress::DayProgress;
use stillwater_core::types::DbId;

use crate::models::progress::DailyProgressRow;

const COLUMNS: &str = "user_id, day, meditation_minutes, habits_completed, updated_at";

pub struct ProgressRepo;

impl ProgressRepo {
    /// Fetch a single day's record.
    pub async fn find_day(
        pool: &PgPool,
        user_id: DbId,
        day: NaiveDate,
    ) -> Result<Option<DailyProgressRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM daily_progress WHERE user_id = $1 AND day = $2");
        sqlx::query_as::<_, DailyProgressRow>(&query)
            .bind(user_id)
            .bind(day)
            .fetch_optional(pool)
            .await
    }

    /// Fetch all records between `from` and `to`, both inclusive, oldest first.
    pub async fn list_range(
        pool: &PgPool,
        user_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyProgressRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_progress \
             WHERE user_id = $1 AND day BETWEEN $2 AND $3 \
             ORDER BY day"
        );
        sqlx::query_as::<_, DailyProgressRow>(&query)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Insert or overwrite the record for `day`.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        day: NaiveDate,
        progress: DayProgress,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO daily_progress (user_id, day, meditation_minutes, habits_completed) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, day) DO UPDATE SET \
                meditation_minutes = EXCLUDED.meditation_minutes, \
                habits_completed = EXCLUDED.habits_completed, \
                updated_at = now()",
        )
        .bind(user_id)
        .bind(day)
        .bind(i32::try_from(progress.minutes).unwrap_or(i32::MAX))
        .bind(i32::try_from(progress.habits).unwrap_or(i32::MAX))
        .execute(pool)
        .await?;
        Ok(())
    }
}
