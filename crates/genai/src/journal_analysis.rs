//! Journal entry analysis flow.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::{GenAiClient, GenAiError};

/// Longest entry sent to the service, in characters. Longer text is cut.
pub const MAX_ENTRY_CHARS: usize = 8_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalAnalysisInput {
    pub journal_entry: String,
}

/// Reflection returned for a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalAnalysis {
    pub summary: String,
    pub analysis: String,
    pub advice: String,
}

pub fn prompt(entry: &str) -> String {
    let entry: String = entry.chars().take(MAX_ENTRY_CHARS).collect();
    format!(
        "You are a supportive wellness coach. Read the journal entry below. \
         Write a one or two sentence summary, a short analysis of the emotions \
         and themes it expresses, and gentle, practical advice for the writer. \
         Do not diagnose.\n\nJournal entry:\n\"\"\"\n{entry}\n\"\"\""
    )
}

pub fn schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "analysis": { "type": "STRING" },
            "advice": { "type": "STRING" }
        },
        "required": ["summary", "analysis", "advice"]
    })
}

/// Analyze one journal entry. Blank entries are rejected before any call.
pub async fn analyze_journal_entry(
    client: &GenAiClient,
    input: &JournalAnalysisInput,
) -> Result<JournalAnalysis, GenAiError> {
    if input.journal_entry.trim().is_empty() {
        return Err(GenAiError::InvalidInput(
            "journal entry must not be empty".into(),
        ));
    }

    let analysis: JournalAnalysis = client
        .generate_json(&prompt(&input.journal_entry), schema())
        .await?;

    if analysis.summary.trim().is_empty() {
        return Err(GenAiError::InvalidOutput("analysis has no summary".into()));
    }

    tracing::info!(
        entry_chars = input.journal_entry.chars().count(),
        "Journal entry analyzed"
    );

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GenAiConfig;

    #[test]
    fn prompt_embeds_entry() {
        let text = prompt("Today I felt rushed at work.");
        assert!(text.contains("Today I felt rushed at work."));
    }

    #[test]
    fn prompt_truncates_long_entries() {
        let long = "a".repeat(MAX_ENTRY_CHARS + 500);
        let text = prompt(&long);
        assert!(!text.contains(&long));
        assert!(text.contains(&"a".repeat(MAX_ENTRY_CHARS)));
    }

    #[test]
    fn input_uses_camel_case() {
        let input: JournalAnalysisInput =
            serde_json::from_str(r#"{"journalEntry": "hello"}"#).unwrap();
        assert_eq!(input.journal_entry, "hello");
    }

    #[tokio::test]
    async fn blank_entry_never_reaches_the_service() {
        let client = GenAiClient::new(GenAiConfig {
            api_key: Some("k".into()),
            base_url: "http://127.0.0.1:1".into(),
            model: "m".into(),
        });
        let input = JournalAnalysisInput {
            journal_entry: "   \n".into(),
        };

        let result = analyze_journal_entry(&client, &input).await;
        assert!(matches!(result, Err(GenAiError::InvalidInput(_))));
    }
}
