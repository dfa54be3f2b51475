//! Contract of the sleep analysis backend.
//!
//! Scoring, recommendation text, chat replies, translations and result
//! history all come from the backend; this module only describes the
//! request/response shapes and a trait to reach them.

mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::EffectivenessRating;
use crate::SleepError;

/// Questionnaire answers keyed by question text.
pub type Answers = BTreeMap<String, String>;

/// Account identity returned by login and signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// One questionnaire question and its allowed answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
}

/// Outcome of submitting a questionnaire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub sleep_score: f64,
    pub effectiveness_percentage: f64,
    /// Free-form recommendation text, input to [`crate::parse`]
    pub recommendations: String,
}

/// A stored questionnaire result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizResult {
    pub id: i64,
    /// ISO-8601 timestamp as sent by the backend
    pub timestamp: String,
    #[serde(default)]
    pub answers: Answers,
    pub sleep_score: f64,
    pub effectiveness_percentage: f64,
    #[serde(default)]
    pub recommendations: String,
}

impl QuizResult {
    pub fn rating(&self) -> EffectivenessRating {
        EffectivenessRating::from_percent(self.effectiveness_percentage)
    }

    /// One-line history entry.
    pub fn summary(&self) -> String {
        format!(
            "Score: {} | Effectiveness: {}%",
            self.sleep_score, self.effectiveness_percentage
        )
    }
}

/// Newest result by timestamp.
pub fn latest_result(results: &[QuizResult]) -> Option<&QuizResult> {
    results.iter().max_by(|a, b| a.timestamp.cmp(&b.timestamp))
}

/// Everything the client side needs from the backend.
#[async_trait]
pub trait SleepBackend: Send + Sync {
    async fn health(&self) -> Result<HealthStatus, SleepError>;

    async fn questions(&self) -> Result<Vec<Question>, SleepError>;

    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, SleepError>;

    async fn login(&self, email: &str, password: &str) -> Result<User, SleepError>;

    async fn predict(&self, email: &str, answers: &Answers) -> Result<Prediction, SleepError>;

    /// Stored results for a user, newest first.
    async fn results(&self, email: &str) -> Result<Vec<QuizResult>, SleepError>;

    async fn chat(&self, message: &str) -> Result<String, SleepError>;

    async fn translate(&self, message: &str, lang: &str) -> Result<String, SleepError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: i64, timestamp: &str, effectiveness: f64) -> QuizResult {
        QuizResult {
            id,
            timestamp: timestamp.to_string(),
            answers: Answers::new(),
            sleep_score: 40.0,
            effectiveness_percentage: effectiveness,
            recommendations: String::new(),
        }
    }

    #[test]
    fn test_latest_result_by_timestamp() {
        let results = vec![
            result(1, "2025-01-02T08:00:00", 40.0),
            result(2, "2025-03-01T08:00:00", 55.0),
            result(3, "2025-02-11T08:00:00", 80.0),
        ];
        assert_eq!(latest_result(&results).map(|r| r.id), Some(2));
        assert!(latest_result(&[]).is_none());
    }

    #[test]
    fn test_summary_and_rating() {
        let r = result(1, "2025-01-02T08:00:00", 53.57);
        assert_eq!(r.summary(), "Score: 40 | Effectiveness: 53.57%");
        assert_eq!(r.rating(), EffectivenessRating::Good);
    }

    #[test]
    fn test_quiz_result_from_backend_json() {
        let json = serde_json::json!({
            "id": 7,
            "timestamp": "2025-05-04T21:15:00.123456",
            "answers": {"What is your age group?": "19–30 (Young Adults)"},
            "sleep_score": 31.5,
            "effectiveness_percentage": 23.21,
            "recommendations": "1. **A**: b"
        });

        let r: QuizResult = serde_json::from_value(json).unwrap();
        assert_eq!(r.id, 7);
        assert_eq!(r.answers.len(), 1);
        assert_eq!(r.rating(), EffectivenessRating::NeedsImprovement);
    }
}
