//! Behaviour of the data endpoints when the database is unreachable.
//!
//! Reads degrade to empty results; writes report `PERSISTENCE_ERROR`.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get_with_cookie, json_with_cookie, offline_app, session_cookie};
use serde_json::json;
use stillwater_core::date_key::DateKey;

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn journal_list_degrades_to_empty() {
    let response = get_with_cookie(offline_app(), "/api/v1/journal", &session_cookie(1)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[tokio::test]
async fn habits_degrade_to_empty() {
    let response =
        get_with_cookie(offline_app(), "/api/v1/habits/2024-07-01", &session_cookie(1)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[tokio::test]
async fn malformed_date_key_is_rejected() {
    let response =
        get_with_cookie(offline_app(), "/api/v1/habits/2024-7-1", &session_cookie(1)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn week_degrades_to_seven_zero_days() {
    let response =
        get_with_cookie(offline_app(), "/api/v1/progress/week", &session_cookie(1)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let days = json["data"].as_array().unwrap();

    assert_eq!(days.len(), 7);
    assert_eq!(days[6]["date"], DateKey::today().to_string());
    for day in days {
        assert_eq!(day["minutes"], 0);
        assert_eq!(day["habits"], 0);
    }
}

#[tokio::test]
async fn missing_profile_is_not_found() {
    let response = get_with_cookie(offline_app(), "/api/v1/profile", &session_cookie(1)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_renders_without_store() {
    let response = get_with_cookie(offline_app(), "/dashboard", &session_cookie(1)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "tester@example.com");
    assert_eq!(json["data"]["habits_completed"], 0);
    assert_eq!(json["data"]["week"].as_array().unwrap().len(), 7);
    assert_eq!(json["data"]["recent_entries"], json!([]));
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn journal_save_reports_persistence_error() {
    let response = json_with_cookie(
        offline_app(),
        Method::POST,
        "/api/v1/journal",
        &session_cookie(1),
        json!({ "content": "Slept well, calm morning.", "mood": "calm" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "PERSISTENCE_ERROR");
}

#[tokio::test]
async fn blank_journal_entry_is_rejected_before_the_store() {
    let response = json_with_cookie(
        offline_app(),
        Method::POST,
        "/api/v1/journal",
        &session_cookie(1),
        json!({ "content": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn journal_delete_reports_persistence_error() {
    let response = json_with_cookie(
        offline_app(),
        Method::DELETE,
        "/api/v1/journal/7",
        &session_cookie(1),
        json!(null),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "PERSISTENCE_ERROR");
}

#[tokio::test]
async fn habits_replace_reports_persistence_error() {
    let response = json_with_cookie(
        offline_app(),
        Method::PUT,
        "/api/v1/habits/2024-07-01",
        &session_cookie(1),
        json!({ "habits": [
            { "id": "5f0c7c56-8f51-4c1e-9a55-3a2b0f1c9d10", "name": "Stretch", "completed": true }
        ] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "PERSISTENCE_ERROR");
}

#[tokio::test]
async fn profile_update_reports_persistence_error() {
    let response = json_with_cookie(
        offline_app(),
        Method::PATCH,
        "/api/v1/profile",
        &session_cookie(1),
        json!({ "display_name": "River" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "PERSISTENCE_ERROR");
}

// ---------------------------------------------------------------------------
// Progress counters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn progress_updates_answer_from_memory() {
    let app = offline_app();
    let cookie = session_cookie(3);
    let today = DateKey::today().to_string();
    let habit_uri = format!("/api/v1/progress/{today}/habit");

    for completed in [true, true, false] {
        let response = json_with_cookie(
            app.clone(),
            Method::POST,
            &habit_uri,
            &cookie,
            json!({ "completed": completed }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = json_with_cookie(
        app.clone(),
        Method::POST,
        &format!("/api/v1/progress/{today}/meditation"),
        &cookie,
        json!({ "minutes": 10 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["date"], today);
    assert_eq!(json["data"]["minutes"], 10);
    assert_eq!(json["data"]["habits"], 1);

    // The week view overlays the unsynced values.
    let response = get_with_cookie(app, "/api/v1/progress/week", &cookie).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][6]["minutes"], 10);
    assert_eq!(json["data"][6]["habits"], 1);
}

#[tokio::test]
async fn zero_minute_meditation_is_rejected() {
    let response = json_with_cookie(
        offline_app(),
        Method::POST,
        "/api/v1/progress/2024-07-01/meditation",
        &session_cookie(1),
        json!({ "minutes": 0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
