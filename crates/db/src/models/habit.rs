//! Habit checklist rows.

use chrono::NaiveDate;
use sqlx::FromRow;
use stillwater_core::habit::Habit;
use uuid::Uuid;

/// A row from the `habits` table.
#[derive(Debug, Clone, FromRow)]
pub struct HabitRow {
    pub id: Uuid,
    pub day: NaiveDate,
    pub position: i32,
    pub name: String,
    pub completed: bool,
}

impl From<HabitRow> for Habit {
    fn from(row: HabitRow) -> Self {
        Habit {
            id: row.id,
            name: row.name,
            completed: row.completed,
        }
    }
}
