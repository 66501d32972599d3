use stillwater_core::error::CoreError;
use stillwater_core::types::DbId;
use stillwater_db::models::profile::{UpdateUserProfile, UserProfile};
use stillwater_db::repositories::ProfileRepo;
use stillwater_db::DbPool;

use super::persistence_error;

/// Longest display name accepted on update.
pub const MAX_DISPLAY_NAME_LEN: usize = 80;

/// The user's profile, `None` if missing or unreadable.
pub async fn get_user_profile(pool: &DbPool, user_id: DbId) -> Option<UserProfile> {
    match ProfileRepo::find_by_user(pool, user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Could not load profile");
            None
        }
    }
}

/// Apply a partial update to the user's profile.
pub async fn update_user_profile(
    pool: &DbPool,
    user_id: DbId,
    patch: &UpdateUserProfile,
) -> Result<UserProfile, CoreError> {
    validate_patch(patch)?;

    ProfileRepo::update(pool, user_id, patch)
        .await
        .map_err(|e| persistence_error("Profile", e))?
        .ok_or(CoreError::NotFound {
            entity: "UserProfile",
            id: user_id,
        })
}

fn validate_patch(patch: &UpdateUserProfile) -> Result<(), CoreError> {
    if let Some(name) = &patch.display_name {
        if name.trim().is_empty() || name.chars().count() > MAX_DISPLAY_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "Display name must be 1-{MAX_DISPLAY_NAME_LEN} characters"
            )));
        }
    }
    if let Some(goal) = patch.daily_goal_minutes {
        if !(1..=24 * 60).contains(&goal) {
            return Err(CoreError::Validation(
                "Daily goal must be between 1 and 1440 minutes".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_valid() {
        assert!(validate_patch(&UpdateUserProfile::default()).is_ok());
    }

    #[test]
    fn blank_display_name_rejected() {
        let patch = UpdateUserProfile {
            display_name: Some("   ".into()),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_err());
    }

    #[test]
    fn goal_bounds() {
        let at = |m| UpdateUserProfile {
            daily_goal_minutes: Some(m),
            ..Default::default()
        };
        assert!(validate_patch(&at(0)).is_err());
        assert!(validate_patch(&at(20)).is_ok());
        assert!(validate_patch(&at(1441)).is_err());
    }
}
