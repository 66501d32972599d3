//! Handlers for daily progress: the weekly chart and the two counters.
//!
//! Counter updates answer from memory immediately; the store is brought up
//! to date by the debounced sync.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use stillwater_core::date_key::DateKey;
use stillwater_core::progress::DayProgress;
use stillwater_core::types::DbId;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::store::progress::get_progress_for_past_week;

/// Request body for `POST /api/v1/progress/{date}/habit`.
#[derive(Debug, Deserialize)]
pub struct LogHabitRequest {
    pub completed: bool,
}

/// Request body for `POST /api/v1/progress/{date}/meditation`.
#[derive(Debug, Deserialize)]
pub struct LogMeditationRequest {
    pub minutes: u32,
}

/// One bar of the weekly chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayProgressView {
    pub date: DateKey,
    pub minutes: u32,
    pub habits: u32,
}

impl DayProgressView {
    fn new(date: DateKey, progress: DayProgress) -> Self {
        Self {
            date,
            minutes: progress.minutes,
            habits: progress.habits,
        }
    }
}

/// GET /api/v1/progress/week
///
/// The seven days ending today, oldest first.
pub async fn past_week(
    State(state): State<AppState>,
    user: SessionUser,
) -> Json<DataResponse<Vec<DayProgressView>>> {
    let week = week_view(&state, user.user_id, DateKey::today()).await;
    Json(DataResponse { data: week })
}

/// POST /api/v1/progress/{date}/habit
pub async fn log_habit(
    State(state): State<AppState>,
    user: SessionUser,
    Path(date): Path<String>,
    AppJson(input): AppJson<LogHabitRequest>,
) -> AppResult<Json<DataResponse<DayProgressView>>> {
    let date: DateKey = date.parse()?;
    let day = state
        .progress
        .log_habit(user.user_id, date, input.completed)
        .await?;
    Ok(Json(DataResponse {
        data: DayProgressView::new(date, day),
    }))
}

/// POST /api/v1/progress/{date}/meditation
pub async fn log_meditation(
    State(state): State<AppState>,
    user: SessionUser,
    Path(date): Path<String>,
    AppJson(input): AppJson<LogMeditationRequest>,
) -> AppResult<Json<DataResponse<DayProgressView>>> {
    let date: DateKey = date.parse()?;
    let day = state
        .progress
        .log_meditation(user.user_id, date, input.minutes)
        .await?;
    Ok(Json(DataResponse {
        data: DayProgressView::new(date, day),
    }))
}

/// Stored week with this process's unsynced updates laid over it.
pub(crate) async fn week_view(state: &AppState, user_id: DbId, today: DateKey) -> Vec<DayProgressView> {
    let stored = get_progress_for_past_week(&state.pool, user_id, today).await;
    state
        .progress
        .overlay(user_id, stored)
        .await
        .into_iter()
        .map(|(date, progress)| DayProgressView::new(date, progress))
        .collect()
}
