//! User profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stillwater_core::types::{DbId, Timestamp};

/// A row from the `user_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub user_id: DbId,
    pub display_name: Option<String>,
    pub email: String,
    pub photo_url: Option<String>,
    pub daily_goal_minutes: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the profile row created alongside a new user.
#[derive(Debug)]
pub struct CreateUserProfile {
    pub user_id: DbId,
    pub display_name: Option<String>,
    pub email: String,
}

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserProfile {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub daily_goal_minutes: Option<i32>,
}
