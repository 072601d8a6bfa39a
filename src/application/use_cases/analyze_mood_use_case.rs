//! Mood analysis use case implementation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::{AnalyzeRequest, require_text};
use crate::application::services::{AnalysisCache, SpiritProfileService, UpstreamHealth};
use crate::domain::entities::{MoodResult, SpiritProfile};
use crate::domain::errors::ValidationError;
use crate::domain::ports::MoodClassifierPort;

/// Classifies free text into a mood and summons the matching spirit.
#[derive(Clone)]
pub struct AnalyzeMoodUseCase {
    classifier: Arc<dyn MoodClassifierPort>,
    profiles: SpiritProfileService,
    cache: Arc<AnalysisCache>,
    health: Arc<UpstreamHealth>,
}

impl AnalyzeMoodUseCase {
    /// Creates new analysis use case.
    #[must_use]
    pub const fn new(
        classifier: Arc<dyn MoodClassifierPort>,
        profiles: SpiritProfileService,
        cache: Arc<AnalysisCache>,
        health: Arc<UpstreamHealth>,
    ) -> Self {
        Self {
            classifier,
            profiles,
            cache,
            health,
        }
    }

    /// Classifies `text`.
    ///
    /// Upstream failures of any kind degrade to [`MoodResult::neutral`].
    ///
    /// # Errors
    /// Returns error if `text` is blank. Nothing is sent upstream then.
    pub async fn classify(&self, text: &str) -> Result<MoodResult, ValidationError> {
        let text = require_text("text", Some(text))?;
        Ok(self.classify_text(text).await.0)
    }

    /// Classifies the request text and builds its spirit profile.
    ///
    /// Profiles are memoized per normalized text. Degraded results are not.
    ///
    /// # Errors
    /// Returns error if the text is missing or blank.
    pub async fn analyze(
        &self,
        request: &AnalyzeRequest,
    ) -> Result<SpiritProfile, ValidationError> {
        let text = require_text("text", request.text.as_deref())?;

        if let Some(profile) = self.cache.get(text) {
            debug!(mood = %profile.mood, "Analysis cache hit");
            return Ok(profile.restamped());
        }

        let (result, degraded) = self.classify_text(text).await;
        let profile = self.profiles.build(&result, text).await;

        info!(
            mood = %profile.mood,
            rarity = ?profile.rarity,
            degraded,
            "Spirit summoned"
        );

        if !degraded {
            self.cache.put(text, profile.clone());
        }
        Ok(profile)
    }

    /// Returns the result and whether it is a fallback.
    async fn classify_text(&self, text: &str) -> (MoodResult, bool) {
        match self.classifier.classify(text).await {
            Ok(scores) => {
                let result = MoodResult::from_scores(scores);
                debug!(label = %result.label, candidates = result.all.len(), "Text classified");
                (result, false)
            }
            Err(e) => {
                self.health.record_failure(&e);
                (MoodResult::neutral(), true)
            }
        }
    }
}
