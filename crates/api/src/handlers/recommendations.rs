//! Handler for AI meditation recommendations.

use axum::extract::State;
use axum::Json;
use chrono::Timelike;
use serde::Deserialize;
use stillwater_core::mood::{Mood, TimeOfDay};
use stillwater_genai::recommendation::{get_recommendation, Recommendation, RecommendationInput};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::i18n::Locale;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/v1/recommendations`.
///
/// `timeOfDay` defaults to the current UTC hour's bucket.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub mood: Mood,
    #[serde(default)]
    pub time_of_day: Option<TimeOfDay>,
}

/// POST /api/v1/recommendations
pub async fn recommend_session(
    State(state): State<AppState>,
    user: SessionUser,
    locale: Locale,
    AppJson(input): AppJson<RecommendationRequest>,
) -> AppResult<Json<DataResponse<Recommendation>>> {
    let input = RecommendationInput {
        mood: input.mood,
        time_of_day: input
            .time_of_day
            .unwrap_or_else(|| TimeOfDay::from_hour(chrono::Utc::now().hour())),
    };

    let rec = get_recommendation(&state.genai, &input)
        .await
        .map_err(|e| AppError::ai(e, locale))?;

    tracing::debug!(user_id = user.user_id, mood = %input.mood, "Recommendation served");
    Ok(Json(DataResponse { data: rec }))
}
