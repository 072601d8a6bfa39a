//! Mood classification types.

use serde::{Deserialize, Serialize};

/// Recognized mood categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Delight, happiness.
    Joy,
    /// Affection, warmth.
    Love,
    /// Quiet contentment.
    Calm,
    /// Astonishment.
    Surprise,
    /// Sorrow, loss.
    Sadness,
    /// Worry, dread.
    Fear,
    /// Irritation, rage.
    Anger,
    /// Revulsion.
    Disgust,
    /// Baseline; also the fallback when classification fails.
    #[default]
    Neutral,
}

impl Mood {
    /// Every recognized mood.
    pub const ALL: [Self; 9] = [
        Self::Joy,
        Self::Love,
        Self::Calm,
        Self::Surprise,
        Self::Sadness,
        Self::Fear,
        Self::Anger,
        Self::Disgust,
        Self::Neutral,
    ];

    /// Lower-case name used on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Love => "love",
            Self::Calm => "calm",
            Self::Surprise => "surprise",
            Self::Sadness => "sadness",
            Self::Fear => "fear",
            Self::Anger => "anger",
            Self::Disgust => "disgust",
            Self::Neutral => "neutral",
        }
    }

    /// Parses a label case-insensitively. Returns `None` for unknown labels.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|mood| mood.name().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single label/score pair reported by a classifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoodScore {
    /// Label as reported upstream (any case).
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f64,
}

impl MoodScore {
    /// Creates a new score.
    #[must_use]
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Normalized classification of a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodResult {
    /// Primary label. Always a recognized mood.
    pub label: Mood,
    /// Every candidate label, lower-cased, by descending score.
    pub all: Vec<String>,
    /// Score of the primary label.
    #[serde(skip)]
    pub confidence: f64,
}

impl MoodResult {
    /// The fixed result returned whenever classification is unavailable.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            label: Mood::Neutral,
            all: Vec::new(),
            confidence: 0.0,
        }
    }

    /// Builds a result from raw classifier scores.
    ///
    /// Scores are ordered by descending confidence and the top entry becomes
    /// the primary label. Non-finite scores are dropped. An empty list or an
    /// unrecognized top label yields [`MoodResult::neutral`].
    #[must_use]
    pub fn from_scores(mut scores: Vec<MoodScore>) -> Self {
        scores.retain(|s| s.score.is_finite());
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));

        let Some(top) = scores.first() else {
            return Self::neutral();
        };
        let Some(label) = Mood::parse(&top.label) else {
            return Self::neutral();
        };

        Self {
            label,
            confidence: top.score,
            all: scores
                .iter()
                .map(|s| s.label.trim().to_lowercase())
                .collect(),
        }
    }
}

impl Default for MoodResult {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("joy", Some(Mood::Joy) ; "lower case")]
    #[test_case("Joy", Some(Mood::Joy) ; "title case")]
    #[test_case("  ANGER ", Some(Mood::Anger) ; "padded upper case")]
    #[test_case("optimism", None ; "unknown label")]
    #[test_case("", None ; "empty")]
    fn test_parse(input: &str, expected: Option<Mood>) {
        assert_eq!(Mood::parse(input), expected);
    }

    #[test]
    fn test_from_scores_sorts_and_lowercases() {
        let result = MoodResult::from_scores(vec![
            MoodScore::new("Calm", 0.1),
            MoodScore::new("Joy", 0.9),
        ]);

        assert_eq!(result.label, Mood::Joy);
        assert_eq!(result.all, vec!["joy", "calm"]);
        assert!((result.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_scores_empty_is_neutral() {
        assert_eq!(MoodResult::from_scores(Vec::new()), MoodResult::neutral());
    }

    #[test]
    fn test_unknown_top_label_is_neutral() {
        let result = MoodResult::from_scores(vec![
            MoodScore::new("optimism", 0.8),
            MoodScore::new("joy", 0.2),
        ]);
        assert_eq!(result, MoodResult::neutral());
    }

    #[test]
    fn test_nan_scores_are_dropped() {
        let result = MoodResult::from_scores(vec![
            MoodScore::new("anger", f64::NAN),
            MoodScore::new("fear", 0.4),
        ]);
        assert_eq!(result.label, Mood::Fear);
        assert_eq!(result.all, vec!["fear"]);
    }

    #[test]
    fn test_serializes_to_wire_shape() {
        let result = MoodResult::from_scores(vec![
            MoodScore::new("Joy", 0.9),
            MoodScore::new("Calm", 0.1),
        ]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "label": "joy", "all": ["joy", "calm"] })
        );
    }
}
