//! Handlers for journal entries and their AI analysis.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use stillwater_core::mood::Mood;
use stillwater_core::types::DbId;
use stillwater_db::models::journal::{CreateJournalEntry, JournalEntry};
use stillwater_genai::journal_analysis::{analyze_journal_entry, JournalAnalysis, JournalAnalysisInput};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::i18n::Locale;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::store::journal::{delete_journal_entry, get_journal_entries, save_journal_entry};

/// Request body for `POST /api/v1/journal`.
#[derive(Debug, Deserialize)]
pub struct SaveEntryRequest {
    pub content: String,
    #[serde(default)]
    pub mood: Option<Mood>,
}

/// GET /api/v1/journal
///
/// The user's entries, newest first.
pub async fn list_entries(
    State(state): State<AppState>,
    user: SessionUser,
) -> Json<DataResponse<Vec<JournalEntry>>> {
    let entries = get_journal_entries(&state.pool, user.user_id).await;
    Json(DataResponse { data: entries })
}

/// POST /api/v1/journal
pub async fn create_entry(
    State(state): State<AppState>,
    user: SessionUser,
    AppJson(input): AppJson<SaveEntryRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<JournalEntry>>)> {
    let create = CreateJournalEntry {
        content: input.content,
        mood: input.mood.map(|m| m.as_str().to_string()),
    };
    let entry = save_journal_entry(&state.pool, user.user_id, &create).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// DELETE /api/v1/journal/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete_journal_entry(&state.pool, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/journal/analysis
///
/// Summarize an entry and suggest what to do next.
pub async fn analyze_entry(
    State(state): State<AppState>,
    user: SessionUser,
    locale: Locale,
    AppJson(input): AppJson<JournalAnalysisInput>,
) -> AppResult<Json<DataResponse<JournalAnalysis>>> {
    let analysis = analyze_journal_entry(&state.genai, &input)
        .await
        .map_err(|e| AppError::ai(e, locale))?;

    tracing::debug!(user_id = user.user_id, "Journal entry analyzed");
    Ok(Json(DataResponse { data: analysis }))
}
