use log::trace;

use crate::model::{RecommendationCard, DEFAULT_EMOJI, DEFAULT_TITLE};
use crate::parsers::items::{first_emoji, ItemBlock};
use crate::parsers::CardParser;

/// Simpler variant used by card-only surfaces.
///
/// The title is whatever precedes the first colon, stripped down to words,
/// and items that end up without a description are dropped.
pub struct CardListParser;

impl CardParser for CardListParser {
    fn name(&self) -> &'static str {
        "card_list"
    }

    fn parse_item(&self, item: &ItemBlock<'_>) -> Option<RecommendationCard> {
        let (title, description) = match item.split_at_colon() {
            Some((before, after)) => (clean_title(before), item.description_from(after)),
            None => {
                let first_words = item
                    .first_line
                    .split(' ')
                    .take(3)
                    .collect::<Vec<_>>()
                    .join(" ");
                (clean_title(&first_words), item.description_from(item.first_line))
            }
        };

        if description.is_empty() {
            trace!("dropping item without description: {:?}", item.first_line);
            return None;
        }

        Some(RecommendationCard {
            emoji: first_emoji(item.first_line).unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
            title: if title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title
            },
            description,
        })
    }
}

/// Keep letters, digits, whitespace, `_`, `-` and parentheses.
fn clean_title(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-' | '(' | ')'))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_strips_markup_and_emoji() {
        assert_eq!(clean_title("🌙 **Wind down**"), "Wind down");
        assert_eq!(clean_title("⚖️ **Work-Life Balance**"), "Work-Life Balance");
        assert_eq!(clean_title("**(Optional) Naps**"), "(Optional) Naps");
    }

    #[test]
    fn test_card_list_title_before_colon() {
        let cards = CardListParser.parse_cards("1. 📅 **Consistent Schedule**: Same time daily");
        assert_eq!(cards[0].title, "Consistent Schedule");
        assert_eq!(cards[0].description, "Same time daily");
        assert_eq!(cards[0].emoji, "📅");
    }

    #[test]
    fn test_card_list_without_colon_uses_first_words() {
        let cards = CardListParser.parse_cards("1. Dim the lights an hour before bed");
        assert_eq!(cards[0].title, "Dim the lights");
        assert_eq!(cards[0].description, "Dim the lights an hour before bed");
        assert_eq!(cards[0].emoji, "💤");
    }

    #[test]
    fn test_card_list_drops_items_without_description() {
        let cards = CardListParser.parse_cards("1. 🌙 **A**:\n2. 📅 **B**: keep a schedule");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "B");
    }

    #[test]
    fn test_card_list_falls_back_to_default_title() {
        let cards = CardListParser.parse_cards("1. 🌙 ***: punctuation only title");
        assert_eq!(cards[0].title, "Sleep Tip");
        assert_eq!(cards[0].description, "punctuation only title");
    }
}
