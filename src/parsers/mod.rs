//! Recommendation text parsing.
//!
//! The backend returns recommendations as one free-form block of text. The
//! functions here pull the header fields, the numbered items and the trailing
//! tips out of it with a set of independent pattern steps, each falling back
//! to a default when its section is missing.

mod card_list;
mod dashboard;
pub mod fields;
mod items;

pub use card_list::CardListParser;
pub use dashboard::DashboardParser;
pub use items::{is_emoji, scan_items, ItemBlock};

use log::debug;
use serde::Deserialize;

use crate::model::{
    Effectiveness, ParsedRecommendations, RecommendationCard, DEFAULT_AGE_GROUP,
    DEFAULT_EFFECTIVENESS,
};

/// Turns numbered item blocks into cards.
pub trait CardParser {
    fn name(&self) -> &'static str;

    /// Build the card for one item; `None` drops the item.
    fn parse_item(&self, item: &ItemBlock<'_>) -> Option<RecommendationCard>;

    fn parse_cards(&self, text: &str) -> Vec<RecommendationCard> {
        scan_items(text)
            .iter()
            .filter_map(|item| self.parse_item(item))
            .collect()
    }
}

/// Which card variant a surface renders with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    /// Header summary plus cards, every item kept
    #[default]
    Dashboard,
    /// Cards only, items without a description dropped
    Cards,
}

impl ParserKind {
    pub fn card_parser(&self) -> &'static dyn CardParser {
        match self {
            ParserKind::Dashboard => &DashboardParser,
            ParserKind::Cards => &CardListParser,
        }
    }
}

/// Caller-supplied defaults for values the text may not carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    pub default_effectiveness: f64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_effectiveness: DEFAULT_EFFECTIVENESS,
        }
    }
}

impl ParseOptions {
    pub fn with_effectiveness(default_effectiveness: f64) -> Self {
        Self {
            default_effectiveness,
        }
    }
}

/// Parse a recommendation block for the dashboard.
///
/// Returns `None` when there is no usable text, which callers render as an
/// empty state. Any other input produces a value, with defaults filling in
/// whatever sections could not be found.
pub fn parse(text: Option<&str>, options: &ParseOptions) -> Option<ParsedRecommendations> {
    let text = text.filter(|t| !t.trim().is_empty())?;

    let age_group = fields::age_group(text).unwrap_or_else(|| {
        debug!("no age group header, using default");
        DEFAULT_AGE_GROUP.to_string()
    });
    let priority_level = fields::priority_level(text).unwrap_or_default();
    let effectiveness = match fields::effectiveness(text) {
        Some(value) => Effectiveness::Reported(value),
        None => {
            debug!(
                "no effectiveness marker, using {}",
                options.default_effectiveness
            );
            Effectiveness::Fallback(options.default_effectiveness)
        }
    };
    let recommendations = DashboardParser.parse_cards(text);
    let general_tips = fields::general_tips(text);

    debug!(
        "parsed {} recommendations and {} tips for {}",
        recommendations.len(),
        general_tips.len(),
        age_group
    );

    Some(ParsedRecommendations {
        age_group,
        priority_level,
        effectiveness,
        recommendations,
        general_tips,
    })
}

/// Parse a recommendation block into cards only, the way card-only surfaces
/// show it. No text means no cards.
pub fn parse_cards(text: Option<&str>) -> Vec<RecommendationCard> {
    text.map(|t| CardListParser.parse_cards(t))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriorityLevel;

    #[test]
    fn test_parse_absent_or_blank_is_no_data() {
        assert_eq!(parse(None, &ParseOptions::default()), None);
        assert_eq!(parse(Some(""), &ParseOptions::default()), None);
        assert_eq!(parse(Some("  \n\t"), &ParseOptions::default()), None);
    }

    #[test]
    fn test_parse_bogus_priority_with_defaults() {
        let parsed = parse(Some("Priority Level: BOGUS"), &ParseOptions::default()).unwrap();
        assert_eq!(parsed.priority_level, PriorityLevel::Unknown("BOGUS".into()));
        assert_eq!(parsed.age_group, DEFAULT_AGE_GROUP);
        assert_eq!(parsed.effectiveness, Effectiveness::Fallback(51.2));
        assert!(parsed.recommendations.is_empty());
        assert!(parsed.general_tips.is_empty());
    }

    #[test]
    fn test_parse_missing_priority_defaults_to_moderate() {
        let parsed = parse(Some("1. **A**: b"), &ParseOptions::default()).unwrap();
        assert_eq!(parsed.priority_level, PriorityLevel::Moderate);
    }

    #[test]
    fn test_parse_uses_caller_effectiveness() {
        let parsed = parse(Some("1. **A**: b"), &ParseOptions::with_effectiveness(33.3)).unwrap();
        assert_eq!(parsed.effectiveness, Effectiveness::Fallback(33.3));
    }

    #[test]
    fn test_parser_kind_selects_variant() {
        assert_eq!(ParserKind::default(), ParserKind::Dashboard);
        assert_eq!(ParserKind::Dashboard.card_parser().name(), "dashboard");
        assert_eq!(ParserKind::Cards.card_parser().name(), "card_list");
    }

    #[test]
    fn test_parse_cards_absent_text() {
        assert!(parse_cards(None).is_empty());
        assert!(parse_cards(Some("")).is_empty());
    }
}
