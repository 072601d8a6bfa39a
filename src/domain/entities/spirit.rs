//! Spirit profile produced by the extended analysis endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Mood;

/// Rarity tier of a summoned spirit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Most spirits.
    Common,
    /// Slightly unusual.
    Uncommon,
    /// Clear, confident moods.
    Rare,
    /// Very strong moods.
    Epic,
    /// Near-certain classification.
    Legendary,
}

impl Rarity {
    /// Derives a tier from classifier confidence.
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        match confidence {
            c if c >= 0.95 => Self::Legendary,
            c if c >= 0.85 => Self::Epic,
            c if c >= 0.70 => Self::Rare,
            c if c >= 0.50 => Self::Uncommon,
            _ => Self::Common,
        }
    }
}

/// Render-ready description of the spirit a piece of text summons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpiritProfile {
    /// Primary mood.
    pub mood: Mood,
    /// Hex color, e.g. `#ffd166`.
    pub color: String,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Short textual essence.
    pub essence: String,
    /// One line the spirit says.
    pub dialogue: String,
    /// When the profile was produced.
    pub timestamp: DateTime<Utc>,
}

impl SpiritProfile {
    /// Returns a copy stamped with the current time.
    #[must_use]
    pub fn restamped(&self) -> Self {
        Self {
            timestamp: Utc::now(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_tiers() {
        assert_eq!(Rarity::from_confidence(0.0), Rarity::Common);
        assert_eq!(Rarity::from_confidence(0.5), Rarity::Uncommon);
        assert_eq!(Rarity::from_confidence(0.72), Rarity::Rare);
        assert_eq!(Rarity::from_confidence(0.9), Rarity::Epic);
        assert_eq!(Rarity::from_confidence(0.99), Rarity::Legendary);
    }

    #[test]
    fn test_profile_wire_shape() {
        let profile = SpiritProfile {
            mood: Mood::Calm,
            color: "#a8dadc".to_string(),
            rarity: Rarity::Rare,
            essence: "still water".to_string(),
            dialogue: "Breathe with me.".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["mood"], "calm");
        assert_eq!(json["rarity"], "rare");
        assert!(json["timestamp"].is_string());
    }
}
