//! Spirit request and response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Mood;
use crate::domain::errors::ValidationError;

/// Body of `POST /api/v1/analyze`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Text to analyze.
    #[serde(default)]
    pub text: Option<String>,
}

impl AnalyzeRequest {
    /// Creates a request for `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Requires present, non-blank text. Returns it trimmed.
///
/// # Errors
/// Returns `MissingField` when absent and `EmptyText` when blank.
pub fn require_text<'a>(
    field: &'static str,
    text: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    let text = text.ok_or(ValidationError::missing(field))?.trim();
    if text.is_empty() {
        return Err(ValidationError::empty(field));
    }
    Ok(text)
}

/// Body of `POST /spirit-gossip`.
///
/// Fields must be present; empty strings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GossipRequest {
    /// Speaking spirit.
    #[serde(default)]
    pub from: Option<String>,
    /// Addressed spirit.
    #[serde(default)]
    pub to: Option<String>,
    /// What is being gossiped about.
    #[serde(default)]
    pub text: Option<String>,
}

/// Gossip with every field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gossip {
    /// Speaking spirit.
    pub from: String,
    /// Addressed spirit.
    pub to: String,
    /// What is being gossiped about.
    pub text: String,
}

impl GossipRequest {
    /// Creates a request with every field set.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            text: Some(text.into()),
        }
    }

    /// Checks that every field is present.
    ///
    /// # Errors
    /// Returns `MissingField` for the first absent field.
    pub fn validate(self) -> Result<Gossip, ValidationError> {
        Ok(Gossip {
            from: self.from.ok_or(ValidationError::missing("from"))?,
            to: self.to.ok_or(ValidationError::missing("to"))?,
            text: self.text.ok_or(ValidationError::missing("text"))?,
        })
    }
}

/// Body of `200 /spirit-gossip`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GossipReply {
    /// What the spirit says.
    pub reply: String,
}

/// Body of `POST /api/v1/spirit-chat/stream`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatStreamRequest {
    /// User message.
    #[serde(default)]
    pub text: Option<String>,
    /// Mood of the spirit answering. Unknown moods are treated as neutral.
    #[serde(default)]
    pub mood: Option<String>,
}

impl ChatStreamRequest {
    /// Parsed mood, neutral when absent or unknown.
    #[must_use]
    pub fn mood(&self) -> Mood {
        self.mood
            .as_deref()
            .and_then(Mood::parse)
            .unwrap_or_default()
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Always `ok` while the process serves requests.
    pub status: &'static str,
    /// Memoized analyses.
    pub cache_size: usize,
    /// Whether the chat credential is present.
    pub openai_configured: bool,
    /// Upstream failures absorbed by soft fallbacks since start.
    pub upstream_failures: u64,
}
