//! Repository for the `user_profiles` table.

use sqlx::PgPool;
use stillwater_core::types::DbId;

use crate::models::profile::{UpdateUserProfile, UserProfile};

const COLUMNS: &str =
    "user_id, display_name, email, photo_url, daily_goal_minutes, created_at, updated_at";

/// Provides profile reads and partial updates.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Fetch the profile for a user, if one exists.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields in `input` are written.
    ///
    /// Returns `None` if the user has no profile row.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateUserProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET \
                display_name = COALESCE($2, display_name), \
                photo_url = COALESCE($3, photo_url), \
                daily_goal_minutes = COALESCE($4, daily_goal_minutes), \
                updated_at = now() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(&input.display_name)
            .bind(&input.photo_url)
            .bind(input.daily_goal_minutes)
            .fetch_optional(pool)
            .await
    }
}
