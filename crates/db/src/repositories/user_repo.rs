//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::profile::CreateUserProfile;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

/// Provides account lookups and creation.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user together with an empty profile, in one transaction.
    ///
    /// A duplicate email surfaces as a unique violation on `uq_users_email`.
    pub async fn create_with_profile(
        pool: &PgPool,
        input: &CreateUser,
        display_name: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (email, password_hash) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        let profile = CreateUserProfile {
            user_id: user.id,
            display_name: display_name.map(str::to_string),
            email: user.email.clone(),
        };
        sqlx::query(
            "INSERT INTO user_profiles (user_id, display_name, email) VALUES ($1, $2, $3)",
        )
        .bind(profile.user_id)
        .bind(&profile.display_name)
        .bind(&profile.email)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
