//! Mood classifier port definition.

use async_trait::async_trait;

use crate::domain::entities::MoodScore;
use crate::domain::errors::UpstreamError;

/// Port for an external text-classification service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoodClassifierPort: Send + Sync {
    /// Returns the label/score candidates reported for `text`.
    async fn classify(&self, text: &str) -> Result<Vec<MoodScore>, UpstreamError>;
}
