//! Guided-meditation recommendation flow.

use serde::{Deserialize, Serialize};
use serde_json::json;
use stillwater_core::mood::{Mood, TimeOfDay};

use crate::api::{GenAiClient, GenAiError};

/// Longest session the flow will accept from the model.
pub const MAX_SESSION_MINUTES: u32 = 120;

/// What the user tells us before asking for a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    pub mood: Mood,
    pub time_of_day: TimeOfDay,
}

/// A suggested guided-meditation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub session_title: String,
    pub session_description: String,
    pub session_length_minutes: u32,
    pub meditation_type: String,
}

/// Render the prompt for `input`.
pub fn prompt(input: &RecommendationInput) -> String {
    format!(
        "You are a meditation guide inside a wellness app. \
         The user feels {mood} and it is currently {time}. \
         Recommend one guided meditation session that suits this mood and \
         time of day. Give it a short inviting title, a two or three sentence \
         description of what the session involves, a length in whole minutes \
         between 1 and {max}, and the meditation type (for example breathing, \
         body scan, loving-kindness, visualization or mindfulness).",
        mood = input.mood,
        time = input.time_of_day,
        max = MAX_SESSION_MINUTES,
    )
}

/// Response schema enforced by the service.
pub fn schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sessionTitle": { "type": "STRING" },
            "sessionDescription": { "type": "STRING" },
            "sessionLengthMinutes": { "type": "INTEGER" },
            "meditationType": { "type": "STRING" }
        },
        "required": [
            "sessionTitle",
            "sessionDescription",
            "sessionLengthMinutes",
            "meditationType"
        ]
    })
}

/// Reject outputs the UI cannot present.
pub fn validate(rec: &Recommendation) -> Result<(), GenAiError> {
    if rec.session_title.trim().is_empty()
        || rec.session_description.trim().is_empty()
        || rec.meditation_type.trim().is_empty()
    {
        return Err(GenAiError::InvalidOutput(
            "recommendation has an empty text field".into(),
        ));
    }
    if !(1..=MAX_SESSION_MINUTES).contains(&rec.session_length_minutes) {
        return Err(GenAiError::InvalidOutput(format!(
            "session length {} is outside 1..={MAX_SESSION_MINUTES}",
            rec.session_length_minutes
        )));
    }
    Ok(())
}

/// Ask the service for a session matching `input`.
pub async fn get_recommendation(
    client: &GenAiClient,
    input: &RecommendationInput,
) -> Result<Recommendation, GenAiError> {
    let rec: Recommendation = client.generate_json(&prompt(input), schema()).await?;
    validate(&rec)?;

    tracing::info!(
        mood = %input.mood,
        time_of_day = %input.time_of_day,
        minutes = rec.session_length_minutes,
        meditation_type = %rec.meditation_type,
        "Meditation recommendation generated",
    );

    Ok(rec)
}
