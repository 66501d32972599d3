//! REST client for the generative-AI `generateContent` endpoint.
//!
//! Every call asks for `application/json` output constrained by a response
//! schema, then decodes the first candidate's text part into the caller's type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default API host.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default model name.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Header carrying the API key. The key must not appear in the URL, which
/// reqwest errors include verbatim.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for the AI service.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// API key. When absent every call fails with [`GenAiError::NotConfigured`].
    pub api_key: Option<String>,
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Model identifier, e.g. `gemini-2.0-flash`.
    pub model: String,
}

impl GenAiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var          | Required | Default                                     |
    /// |------------------|----------|---------------------------------------------|
    /// | `GENAI_API_KEY`  | no       | --                                          |
    /// | `GENAI_BASE_URL` | no       | `https://generativelanguage.googleapis.com` |
    /// | `GENAI_MODEL`    | no       | `gemini-2.0-flash`                          |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let base_url = std::env::var("GENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("GENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        Self {
            api_key,
            base_url,
            model,
        }
    }
}

/// Errors from the AI service layer.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// No API key was configured.
    #[error("AI service is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("AI service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered without any text candidate (e.g. safety block).
    #[error("AI service returned no content")]
    EmptyResponse,

    /// The caller's input was rejected before contacting the service.
    #[error("Invalid AI input: {0}")]
    InvalidInput(String),

    /// The returned text was not the JSON shape the flow asked for.
    #[error("AI output did not match the expected shape: {0}")]
    InvalidOutput(String),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

/// Response body of `generateContent`.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

/// Decode the JSON text produced by the model into `T`.
///
/// Models occasionally wrap JSON in a Markdown code fence even when asked
/// not to; the fence is stripped first.
pub fn decode_output<T: DeserializeOwned>(text: &str) -> Result<T, GenAiError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).map_err(|e| GenAiError::InvalidOutput(e.to_string()))
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the AI service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GenAiClient {
    client: reqwest::Client,
    config: GenAiConfig,
}

impl GenAiClient {
    pub fn new(config: GenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Whether an API key is available.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Send `prompt` and decode the structured reply into `T`.
    ///
    /// `schema` is the OpenAPI-style response schema the service enforces.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<T, GenAiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenAiError::NotConfigured)?;

        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        tracing::debug!(model = %self.config.model, "Sending generateContent request");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed: GenerateResponse = response.json().await?;
        let text = parsed.first_text().ok_or(GenAiError::EmptyResponse)?;

        decode_output(text)
    }

    /// Return the response unchanged on success, or an [`GenAiError::Api`]
    /// carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
