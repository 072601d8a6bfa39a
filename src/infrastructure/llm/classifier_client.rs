//! Text-classification API client.

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, warn};

use super::dto::{ClassificationRequest, ClassificationResponse};
use crate::domain::entities::{ApiKey, MoodScore};
use crate::domain::errors::UpstreamError;
use crate::domain::ports::MoodClassifierPort;

const SERVICE: &str = "classifier";

/// Client for a Hugging Face style inference endpoint.
pub struct HuggingFaceClassifier {
    client: Client,
    url: String,
    token: Option<ApiKey>,
}

impl HuggingFaceClassifier {
    /// Creates a client for `url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        url: impl Into<String>,
        token: Option<ApiKey>,
        timeout: std::time::Duration,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            UpstreamError::Transport {
                service: SERVICE,
                message: format!("failed to create HTTP client: {e}"),
            }
        })?;

        Ok(Self {
            client,
            url: url.into(),
            token,
        })
    }
}

/// Parses a classification body into label/score pairs.
///
/// # Errors
/// Returns `Malformed` for non-JSON or unexpected shapes and `Reported` when
/// the upstream answered with an error object.
pub fn parse_classification(body: &str) -> Result<Vec<MoodScore>, UpstreamError> {
    let response: ClassificationResponse = serde_json::from_str(body)
        .map_err(|e| UpstreamError::malformed(SERVICE, e.to_string()))?;

    let scores = match response {
        ClassificationResponse::Nested(lists) => lists.into_iter().next().unwrap_or_default(),
        ClassificationResponse::Flat(scores) => scores,
        ClassificationResponse::Error(err) => {
            return Err(UpstreamError::reported(SERVICE, err.error));
        }
    };

    if scores.is_empty() {
        return Err(UpstreamError::malformed(SERVICE, "no labels in response"));
    }
    Ok(scores)
}

#[async_trait]
impl MoodClassifierPort for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<MoodScore>, UpstreamError> {
        debug!(chars = text.chars().count(), "Requesting mood classification");

        let mut request = self
            .client
            .post(&self.url)
            .json(&ClassificationRequest { inputs: text });
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token.as_str()));
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach classifier");
            UpstreamError::from_reqwest(SERVICE, &e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, &e))?;

        if !status.is_success() {
            let message = parse_classification(&body)
                .err()
                .map_or_else(|| format!("HTTP {status}"), |e| e.to_string());
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: status.as_u16(),
                message,
            });
        }

        parse_classification(&body)
    }
}
