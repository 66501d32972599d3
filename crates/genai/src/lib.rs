//! Client for the hosted generative-AI service and the prompt flows built on it.
//!
//! - [`api`] -- HTTP wrapper around the `generateContent` endpoint that
//!   requests JSON output and decodes it into a typed value.
//! - [`recommendation`] -- guided-meditation suggestion from mood and time of day.
//! - [`journal_analysis`] -- summary, reflection and advice for a journal entry.

pub mod api;
pub mod journal_analysis;
pub mod recommendation;

pub use api::{GenAiClient, GenAiConfig, GenAiError};
