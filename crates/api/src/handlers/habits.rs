//! Handlers for a day's habit checklist.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use stillwater_core::date_key::DateKey;
use stillwater_core::habit::Habit;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::store::habits::{get_habits_for_date, update_habits_for_date};

/// Request body for `PUT /api/v1/habits/{date}`.
#[derive(Debug, Deserialize)]
pub struct ReplaceHabitsRequest {
    pub habits: Vec<Habit>,
}

/// GET /api/v1/habits/{date}
pub async fn list_habits(
    State(state): State<AppState>,
    user: SessionUser,
    Path(date): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Habit>>>> {
    let date: DateKey = date.parse()?;
    let habits = get_habits_for_date(&state.pool, user.user_id, date).await;
    Ok(Json(DataResponse { data: habits }))
}

/// PUT /api/v1/habits/{date}
///
/// Replace the whole list. Returns 204 No Content.
pub async fn replace_habits(
    State(state): State<AppState>,
    user: SessionUser,
    Path(date): Path<String>,
    AppJson(input): AppJson<ReplaceHabitsRequest>,
) -> AppResult<StatusCode> {
    let date: DateKey = date.parse()?;
    update_habits_for_date(&state.pool, user.user_id, date, &input.habits).await?;
    Ok(StatusCode::NO_CONTENT)
}
