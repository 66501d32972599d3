//! Repository for the `habits` table.
//!
//! A day's checklist is always read and written as a whole list.

use chrono::NaiveDate;
use sqlx::PgPool;
use stillwater_core::habit::Habit;
use stillwater_core::types::DbId;

use crate::models::habit::HabitRow;

const COLUMNS: &str = "id, day, position, name, completed";

pub struct HabitRepo;

impl HabitRepo {
    /// List a user's habits for `day` in checklist order.
    pub async fn list_for_day(
        pool: &PgPool,
        user_id: DbId,
        day: NaiveDate,
    ) -> Result<Vec<Habit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM habits \
             WHERE user_id = $1 AND day = $2 \
             ORDER BY position"
        );
        let rows = sqlx::query_as::<_, HabitRow>(&query)
            .bind(user_id)
            .bind(day)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Habit::from).collect())
    }

    /// Replace the user's checklist for `day` with `habits`, in one transaction.
    pub async fn replace_for_day(
        pool: &PgPool,
        user_id: DbId,
        day: NaiveDate,
        habits: &[Habit],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM habits WHERE user_id = $1 AND day = $2")
            .bind(user_id)
            .bind(day)
            .execute(&mut *tx)
            .await?;

        for (position, habit) in habits.iter().enumerate() {
            sqlx::query(
                "INSERT INTO habits (user_id, day, id, position, name, completed) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(user_id)
            .bind(day)
            .bind(habit.id)
            .bind(position as i32)
            .bind(habit.name.trim())
            .bind(habit.completed)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
