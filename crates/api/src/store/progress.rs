use std::collections::BTreeMap;

use async_trait::async_trait;
use stillwater_core::date_key::DateKey;
use stillwater_core::error::CoreError;
use stillwater_core::progress::DayProgress;
use stillwater_core::types::DbId;
use stillwater_db::repositories::ProgressRepo;
use stillwater_db::DbPool;

use super::persistence_error;
use crate::sync::ProgressStore;

/// [`ProgressStore`] backed by the `daily_progress` table.
#[derive(Clone)]
pub struct PgProgressStore {
    pool: DbPool,
}

impl PgProgressStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressStore for PgProgressStore {
    async fn load_day(
        &self,
        user_id: DbId,
        date: DateKey,
    ) -> Result<Option<DayProgress>, CoreError> {
        ProgressRepo::find_day(&self.pool, user_id, date.date())
            .await
            .map(|row| row.as_ref().map(DayProgress::from))
            .map_err(|e| CoreError::Internal(format!("Failed to load progress: {e}")))
    }

    async fn save_day(
        &self,
        user_id: DbId,
        date: DateKey,
        progress: DayProgress,
    ) -> Result<(), CoreError> {
        update_progress(&self.pool, user_id, date, progress).await
    }
}

/// Overwrite the stored record for one day.
pub async fn update_progress(
    pool: &DbPool,
    user_id: DbId,
    date: DateKey,
    progress: DayProgress,
) -> Result<(), CoreError> {
    ProgressRepo::upsert(pool, user_id, date.date(), progress)
        .await
        .map_err(|e| persistence_error("Progress", e))
}

/// The seven days ending `today`, oldest first, with missing days as zeros.
///
/// A read failure yields an all-zero week.
pub async fn get_progress_for_past_week(
    pool: &DbPool,
    user_id: DbId,
    today: DateKey,
) -> BTreeMap<DateKey, DayProgress> {
    let mut week: BTreeMap<DateKey, DayProgress> = today
        .week_ending()
        .into_iter()
        .map(|date| (date, DayProgress::default()))
        .collect();

    let Some(from) = week.keys().next().copied() else {
        return week;
    };

    match ProgressRepo::list_range(pool, user_id, from.date(), today.date()).await {
        Ok(rows) => {
            for row in &rows {
                week.insert(DateKey::from(row.day), DayProgress::from(row));
            }
        }
        Err(e) => {
            tracing::warn!(user_id, %today, error = %e, "Could not load weekly progress");
        }
    }
    week
}
