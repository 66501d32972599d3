//! Daily progress rows.

use chrono::NaiveDate;
use sqlx::FromRow;
use stillwater_core::progress::DayProgress;
use stillwater_core::types::{DbId, Timestamp};

/// A row from the `daily_progress` table.
#[derive(Debug, Clone, FromRow)]
pub struct DailyProgressRow {
    pub user_id: DbId,
    pub day: NaiveDate,
    pub meditation_minutes: i32,
    pub habits_completed: i32,
    pub updated_at: Timestamp,
}

impl From<&DailyProgressRow> for DayProgress {
    fn from(row: &DailyProgressRow) -> Self {
        // The table's CHECK constraints keep both columns non-negative.
        DayProgress {
            minutes: u32::try_from(row.meditation_minutes).unwrap_or(0),
            habits: u32::try_from(row.habits_completed).unwrap_or(0),
        }
    }
}
