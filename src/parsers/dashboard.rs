use crate::model::{RecommendationCard, DEFAULT_EMOJI, DEFAULT_TITLE};
use crate::parsers::items::{bold_text, first_emoji, ItemBlock};
use crate::parsers::CardParser;

/// Header-aware variant used by the dashboard.
///
/// Titles come from the bolded text on the item's first line. Every numbered
/// item produces a card, even when its description ends up empty.
pub struct DashboardParser;

impl CardParser for DashboardParser {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn parse_item(&self, item: &ItemBlock<'_>) -> Option<RecommendationCard> {
        let emoji = first_emoji(item.first_line).unwrap_or_else(|| DEFAULT_EMOJI.to_string());
        let title = bold_text(item.first_line).unwrap_or(DEFAULT_TITLE).to_string();

        let description = match item.split_at_colon() {
            Some((_, after)) => item.description_from(after),
            None => item.description_from(item.first_line),
        };

        Some(RecommendationCard {
            emoji,
            title,
            description,
        })
    }
}
