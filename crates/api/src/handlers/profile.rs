//! Handlers for the signed-in user's profile.

use axum::extract::State;
use axum::Json;
use stillwater_core::error::CoreError;
use stillwater_db::models::profile::{UpdateUserProfile, UserProfile};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::store::profile::{get_user_profile, update_user_profile};

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: SessionUser,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = get_user_profile(&state.pool, user.user_id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UserProfile",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PATCH /api/v1/profile
///
/// Absent fields are left unchanged.
pub async fn update_profile(
    State(state): State<AppState>,
    user: SessionUser,
    AppJson(patch): AppJson<UpdateUserProfile>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = update_user_profile(&state.pool, user.user_id, &patch).await?;
    tracing::info!(user_id = user.user_id, "Profile updated");
    Ok(Json(DataResponse { data: profile }))
}
