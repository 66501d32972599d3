//! Handler for the dashboard summary.

use axum::extract::State;
use axum::response::Redirect;
use axum::Json;
use serde::Serialize;
use stillwater_core::date_key::DateKey;
use stillwater_core::habit::{completed_count, Habit};
use stillwater_db::models::journal::JournalEntry;

use crate::handlers::progress::{week_view, DayProgressView};
use crate::middleware::route_zone::DASHBOARD_PATH;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::store::habits::get_habits_for_date;
use crate::store::journal::get_recent_journal_entries;
use crate::store::profile::get_user_profile;

/// Journal entries shown on the dashboard.
const RECENT_ENTRIES: i64 = 3;

/// Everything the dashboard renders, in one payload.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub email: String,
    pub display_name: Option<String>,
    pub picture: Option<String>,
    pub daily_goal_minutes: Option<i32>,
    pub today: DateKey,
    pub habits: Vec<Habit>,
    pub habits_completed: u32,
    pub week: Vec<DayProgressView>,
    pub recent_entries: Vec<JournalEntry>,
}

/// GET /
pub async fn root() -> Redirect {
    Redirect::temporary(DASHBOARD_PATH)
}

/// GET /dashboard
///
/// Built from read accessors only, so a store outage yields an empty
/// dashboard rather than an error.
pub async fn dashboard(
    State(state): State<AppState>,
    user: SessionUser,
) -> Json<DataResponse<DashboardSummary>> {
    let today = DateKey::today();

    let (profile, habits, week, entries) = tokio::join!(
        get_user_profile(&state.pool, user.user_id),
        get_habits_for_date(&state.pool, user.user_id, today),
        week_view(&state, user.user_id, today),
        get_recent_journal_entries(&state.pool, user.user_id, RECENT_ENTRIES),
    );

    let (display_name, daily_goal_minutes) = profile
        .map(|p| (p.display_name, p.daily_goal_minutes))
        .unwrap_or_default();

    Json(DataResponse {
        data: DashboardSummary {
            email: user.email,
            display_name,
            picture: user.picture,
            daily_goal_minutes,
            today,
            habits_completed: completed_count(&habits),
            habits,
            week,
            recent_entries: entries,
        },
    })
}
