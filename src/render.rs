//! Plain-text rendering for terminals.

use crate::builder::Report;
use crate::model::{EffectivenessRating, ParsedRecommendations, RecommendationCard};

const EMPTY_STATE: &str = "No recommendations available.";

pub fn render_report(report: &Report) -> String {
    match report {
        Report::Dashboard(Some(parsed)) => render_dashboard(parsed),
        Report::Dashboard(None) => EMPTY_STATE.to_string(),
        Report::Cards(cards) if cards.is_empty() => EMPTY_STATE.to_string(),
        Report::Cards(cards) => render_cards(cards),
    }
}

/// Header summary, cards, then general tips.
pub fn render_dashboard(parsed: &ParsedRecommendations) -> String {
    let mut out = String::new();
    let priority = &parsed.priority_level;

    out.push_str("🌟 Sleep Recommendations\n");
    out.push_str(&format!("{} {} PRIORITY\n", priority.icon(), priority));
    out.push_str(&format!("Target Age Group: {}\n", parsed.age_group));
    match parsed.effectiveness.as_percent() {
        Some(percent) => {
            out.push_str(&format!(
                "Sleep Effectiveness: {}% ({})\n",
                parsed.effectiveness,
                EffectivenessRating::from_percent(percent).label()
            ));
        }
        None => {
            out.push_str(&format!("Sleep Effectiveness: {}%\n", parsed.effectiveness));
        }
    }

    if !parsed.recommendations.is_empty() {
        out.push('\n');
        out.push_str(&render_cards(&parsed.recommendations));
    }

    if !parsed.general_tips.is_empty() {
        out.push_str("\n💡 General Tips for Better Sleep\n");
        for tip in &parsed.general_tips {
            out.push_str(&format!("  • {}\n", tip));
        }
    }

    out
}

pub fn render_cards(cards: &[RecommendationCard]) -> String {
    let mut out = String::new();
    for (index, card) in cards.iter().enumerate() {
        out.push_str(&format!("{}. {} {}\n", index + 1, card.emoji, card.title));
        for line in card.description.lines() {
            out.push_str(&format!("   {}\n", line));
        }
    }
    out
}
