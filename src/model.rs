use serde::{Deserialize, Serialize};
use std::fmt;

/// Age group shown when the text carries no recognisable header.
pub const DEFAULT_AGE_GROUP: &str = "Young Adults (19-30 years)";

/// Glyph used for items without an emoji of their own.
pub const DEFAULT_EMOJI: &str = "💤";

/// Title used for items without a recognisable title.
pub const DEFAULT_TITLE: &str = "Sleep Tip";

/// Effectiveness shown when neither the text nor the caller supplies one.
pub const DEFAULT_EFFECTIVENESS: f64 = 51.2;

/// One displayable recommendation extracted from a numbered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationCard {
    pub emoji: String,
    pub title: String,
    pub description: String,
}

/// Structured view of a recommendation text block.
///
/// Built fresh from the latest text on every call; nothing here is meant to be
/// stored or sent back to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecommendations {
    pub age_group: String,
    pub priority_level: PriorityLevel,
    #[serde(rename = "effectivenessValue")]
    pub effectiveness: Effectiveness,
    pub recommendations: Vec<RecommendationCard>,
    pub general_tips: Vec<String>,
}

/// Coarse urgency classification embedded in the text by the backend.
///
/// Unrecognised markers are kept verbatim (upper-cased) in `Unknown` so the
/// display shows exactly what the backend sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PriorityLevel {
    High,
    #[default]
    Moderate,
    Low,
    Unknown(String),
}

impl PriorityLevel {
    /// Build from the word following `Priority Level:`
    pub fn from_marker(word: &str) -> Self {
        let word = word.trim().to_uppercase();
        match word.as_str() {
            "HIGH" => PriorityLevel::High,
            "MODERATE" => PriorityLevel::Moderate,
            "LOW" => PriorityLevel::Low,
            _ => PriorityLevel::Unknown(word),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PriorityLevel::High => "HIGH",
            PriorityLevel::Moderate => "MODERATE",
            PriorityLevel::Low => "LOW",
            PriorityLevel::Unknown(word) => word,
        }
    }

    /// Badge glyph for the priority header.
    pub fn icon(&self) -> &'static str {
        match self {
            PriorityLevel::High => "🚨",
            PriorityLevel::Moderate => "⚠️",
            PriorityLevel::Low => "✅",
            PriorityLevel::Unknown(_) => "💡",
        }
    }
}

impl From<String> for PriorityLevel {
    fn from(word: String) -> Self {
        PriorityLevel::from_marker(&word)
    }
}

impl From<PriorityLevel> for String {
    fn from(level: PriorityLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sleep effectiveness percentage.
///
/// `Reported` keeps the numeric text exactly as it appeared in the
/// recommendation text; `Fallback` is the caller-supplied default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Effectiveness {
    Reported(String),
    Fallback(f64),
}

impl Effectiveness {
    /// Numeric value, if the reported text parses as a number.
    pub fn as_percent(&self) -> Option<f64> {
        match self {
            Effectiveness::Reported(text) => text.parse().ok(),
            Effectiveness::Fallback(value) => Some(*value),
        }
    }
}

impl fmt::Display for Effectiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effectiveness::Reported(text) => f.write_str(text),
            Effectiveness::Fallback(value) => write!(f, "{}", value),
        }
    }
}

/// Dashboard verdict for an effectiveness percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectivenessRating {
    NeedsImprovement,
    Good,
    Excellent,
}

impl EffectivenessRating {
    pub fn from_percent(percent: f64) -> Self {
        if percent < 50.0 {
            EffectivenessRating::NeedsImprovement
        } else if percent < 75.0 {
            EffectivenessRating::Good
        } else {
            EffectivenessRating::Excellent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EffectivenessRating::NeedsImprovement => "Needs Improvement",
            EffectivenessRating::Good => "Good",
            EffectivenessRating::Excellent => "Excellent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_marker_is_case_insensitive() {
        assert_eq!(PriorityLevel::from_marker("high"), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_marker("Moderate"), PriorityLevel::Moderate);
        assert_eq!(PriorityLevel::from_marker(" LOW "), PriorityLevel::Low);
    }

    #[test]
    fn test_priority_keeps_unknown_words_uppercased() {
        let level = PriorityLevel::from_marker("maintenance");
        assert_eq!(level, PriorityLevel::Unknown("MAINTENANCE".to_string()));
        assert_eq!(level.as_str(), "MAINTENANCE");
        assert_eq!(level.icon(), "💡");
    }

    #[test]
    fn test_priority_serializes_as_plain_string() {
        let json = serde_json::to_string(&PriorityLevel::High).unwrap();
        assert_eq!(json, "\"HIGH\"");

        let back: PriorityLevel = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(back.as_str(), "BOGUS");
    }

    #[test]
    fn test_effectiveness_serialization_keeps_source_type() {
        let reported = serde_json::to_value(Effectiveness::Reported("62.5".into())).unwrap();
        assert_eq!(reported, serde_json::json!("62.5"));

        let fallback = serde_json::to_value(Effectiveness::Fallback(51.2)).unwrap();
        assert_eq!(fallback, serde_json::json!(51.2));
    }

    #[test]
    fn test_effectiveness_as_percent() {
        assert_eq!(Effectiveness::Reported("62.5".into()).as_percent(), Some(62.5));
        assert_eq!(Effectiveness::Reported("n/a".into()).as_percent(), None);
        assert_eq!(Effectiveness::Fallback(40.0).as_percent(), Some(40.0));
    }

    #[test]
    fn test_effectiveness_rating_thresholds() {
        assert_eq!(
            EffectivenessRating::from_percent(49.9),
            EffectivenessRating::NeedsImprovement
        );
        assert_eq!(EffectivenessRating::from_percent(50.0), EffectivenessRating::Good);
        assert_eq!(EffectivenessRating::from_percent(74.99), EffectivenessRating::Good);
        assert_eq!(
            EffectivenessRating::from_percent(75.0).label(),
            "Excellent"
        );
    }

    #[test]
    fn test_parsed_recommendations_json_field_names() {
        let parsed = ParsedRecommendations {
            age_group: DEFAULT_AGE_GROUP.to_string(),
            priority_level: PriorityLevel::default(),
            effectiveness: Effectiveness::Fallback(DEFAULT_EFFECTIVENESS),
            recommendations: vec![],
            general_tips: vec![],
        };

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["ageGroup"], "Young Adults (19-30 years)");
        assert_eq!(value["priorityLevel"], "MODERATE");
        assert_eq!(value["effectivenessValue"], 51.2);
        assert!(value["generalTips"].as_array().unwrap().is_empty());
    }
}
