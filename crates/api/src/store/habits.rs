use stillwater_core::date_key::DateKey;
use stillwater_core::error::CoreError;
use stillwater_core::habit::{validate_habits, Habit};
use stillwater_core::types::DbId;
use stillwater_db::repositories::HabitRepo;
use stillwater_db::DbPool;

use super::persistence_error;

/// The user's habits for `date`, in saved order. Empty on read failure.
pub async fn get_habits_for_date(pool: &DbPool, user_id: DbId, date: DateKey) -> Vec<Habit> {
    match HabitRepo::list_for_day(pool, user_id, date.date()).await {
        Ok(habits) => habits,
        Err(e) => {
            tracing::warn!(user_id, %date, error = %e, "Could not load habits");
            Vec::new()
        }
    }
}

/// Replace the user's habit list for `date`.
pub async fn update_habits_for_date(
    pool: &DbPool,
    user_id: DbId,
    date: DateKey,
    habits: &[Habit],
) -> Result<(), CoreError> {
    validate_habits(habits)?;

    HabitRepo::replace_for_day(pool, user_id, date.date(), habits)
        .await
        .map_err(|e| persistence_error("Habits", e))?;

    tracing::debug!(user_id, %date, count = habits.len(), "Habits saved");
    Ok(())
}
