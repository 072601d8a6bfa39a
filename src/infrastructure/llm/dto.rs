//! Upstream API request and response structures.

use serde::{Deserialize, Serialize};

use crate::domain::entities::MoodScore;

/// Text-classification request body.
#[derive(Debug, Serialize)]
pub struct ClassificationRequest<'a> {
    /// Text to classify.
    pub inputs: &'a str,
}

/// Text-classification response.
///
/// Inference endpoints answer either one list per input, a flat list, or an
/// error object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClassificationResponse {
    /// `[[{label, score}, ...]]`
    Nested(Vec<Vec<MoodScore>>),
    /// `[{label, score}, ...]`
    Flat(Vec<MoodScore>),
    /// `{"error": "..."}`
    Error(ErrorMessage),
}

/// Upstream error payload with a plain message.
#[derive(Debug, Deserialize)]
pub struct ErrorMessage {
    /// Error description.
    pub error: String,
}

/// Chat completion request body.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    /// Model name.
    pub model: &'a str,
    /// Conversation.
    pub messages: Vec<ChatMessage<'a>>,
    /// Generation limit.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Whether to stream the answer.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

/// A single chat message.
#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    /// `system` or `user`.
    pub role: &'static str,
    /// Message text.
    pub content: &'a str,
}

/// Chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Generated choices.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One generated choice.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// Complete message (non-streaming).
    #[serde(default)]
    pub message: Option<ChatChoiceContent>,
    /// Incremental delta (streaming).
    #[serde(default)]
    pub delta: Option<ChatChoiceContent>,
}

/// Message or delta content.
#[derive(Debug, Deserialize)]
pub struct ChatChoiceContent {
    /// Text, absent on role-only deltas.
    #[serde(default)]
    pub content: Option<String>,
}

/// OpenAI-style error envelope.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorDetail,
}

/// OpenAI-style error details.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    /// Error description.
    pub message: String,
}
