pub mod api;
pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use api::{Answers, HttpBackend, Prediction, QuizResult, SleepBackend, User};
pub use builder::{Report, ReportSource, SleepReport, SleepReportBuilder};
pub use config::AppConfig;
pub use error::SleepError;
pub use model::{
    Effectiveness, EffectivenessRating, ParsedRecommendations, PriorityLevel, RecommendationCard,
};
pub use parsers::{parse, parse_cards, ParseOptions, ParserKind};
pub use session::{Session, SessionStore};

/// Convenience function to parse recommendation text with the default
/// effectiveness fallback.
///
/// # Example
/// ```
/// let parsed = sleep_insights::parse_text("1. 🌙 **Wind down**: Read before bed").unwrap();
/// assert_eq!(parsed.recommendations[0].title, "Wind down");
/// ```
pub fn parse_text(text: &str) -> Option<ParsedRecommendations> {
    parse(Some(text), &ParseOptions::default())
}

/// Convenience function to fetch and parse the latest stored result of a user.
///
/// The backend is built from [`AppConfig::load`].
pub async fn latest_report(email: &str) -> Result<Report, SleepError> {
    SleepReport::builder().latest_for(email).build().await
}
