//! Turns a mood classification into a render-ready spirit profile.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::domain::entities::{Mood, MoodResult, Rarity, SpiritProfile};
use crate::domain::ports::{ChatPort, ChatRequest};

use super::UpstreamHealth;

/// Presentation attributes attached to a mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodPalette {
    /// Hex color.
    pub color: &'static str,
    /// Short essence.
    pub essence: &'static str,
    /// Line used when the chat model is unavailable.
    pub line: &'static str,
}

/// Returns the palette of `mood`.
#[must_use]
pub const fn palette(mood: Mood) -> MoodPalette {
    match mood {
        Mood::Joy => MoodPalette {
            color: "#ffd166",
            essence: "sunlit sparkle",
            line: "Every leaf is dancing today, and so am I!",
        },
        Mood::Love => MoodPalette {
            color: "#ff8fab",
            essence: "warm ember glow",
            line: "I'll keep a little light burning for you.",
        },
        Mood::Calm => MoodPalette {
            color: "#a8dadc",
            essence: "still moonlit water",
            line: "Breathe with me. The forest is in no hurry.",
        },
        Mood::Surprise => MoodPalette {
            color: "#c77dff",
            essence: "crackling starlight",
            line: "Oh! I did not see that coming through the ferns.",
        },
        Mood::Sadness => MoodPalette {
            color: "#5e81ac",
            essence: "soft falling rain",
            line: "Even the rain rests eventually. I'll drift beside you.",
        },
        Mood::Fear => MoodPalette {
            color: "#6c757d",
            essence: "flickering shadow",
            line: "Stay close to my glow. The dark is smaller than it seems.",
        },
        Mood::Anger => MoodPalette {
            color: "#e63946",
            essence: "smouldering cinder",
            line: "Let the wind carry some of that fire away.",
        },
        Mood::Disgust => MoodPalette {
            color: "#8a9a5b",
            essence: "murky bog mist",
            line: "Ugh, the swamp smells worse than usual today.",
        },
        Mood::Neutral => MoodPalette {
            color: "#e0e1dd",
            essence: "drifting wisp",
            line: "I'm listening. Tell me more.",
        },
    }
}

/// Builds spirit profiles, asking the chat model for dialogue when configured.
#[derive(Clone)]
pub struct SpiritProfileService {
    chat: Arc<dyn ChatPort>,
    health: Arc<UpstreamHealth>,
}

impl SpiritProfileService {
    /// Creates the service.
    #[must_use]
    pub fn new(chat: Arc<dyn ChatPort>, health: Arc<UpstreamHealth>) -> Self {
        Self { chat, health }
    }

    /// Builds the profile for `result`, summoned by `text`.
    pub async fn build(&self, result: &MoodResult, text: &str) -> SpiritProfile {
        let palette = palette(result.label);
        let dialogue = self.dialogue(result.label, text).await;

        SpiritProfile {
            mood: result.label,
            color: palette.color.to_string(),
            rarity: Rarity::from_confidence(result.confidence),
            essence: palette.essence.to_string(),
            dialogue,
            timestamp: Utc::now(),
        }
    }

    async fn dialogue(&self, mood: Mood, text: &str) -> String {
        let fallback = palette(mood).line;
        if !self.chat.is_configured() {
            debug!(mood = %mood, "Chat model not configured, using fixed dialogue");
            return fallback.to_string();
        }

        let request = ChatRequest::new(
            format!(
                "You are a tiny {mood} forest wisp. Answer with a single short, \
                 whimsical line of dialogue, no more than 20 words."
            ),
            text,
        )
        .with_max_tokens(60);

        match self.chat.complete(request).await {
            Ok(line) => line,
            Err(e) => {
                self.health.record_failure(&e);
                fallback.to_string()
            }
        }
    }
}
