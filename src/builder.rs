use log::debug;
use std::sync::Arc;

use crate::api::{latest_result, Answers, HttpBackend, SleepBackend};
use crate::config::AppConfig;
use crate::model::{ParsedRecommendations, RecommendationCard};
use crate::parsers::{self, ParseOptions, ParserKind};
use crate::SleepError;

/// Where the recommendation text comes from
#[derive(Debug, Clone)]
pub enum ReportSource {
    /// Text already at hand
    Text(String),
    /// Most recent stored result of a user
    Latest { email: String },
    /// Submit answers and use the fresh prediction
    Prediction { email: String, answers: Answers },
}

/// A parsed report, shaped for the chosen view
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// Header summary plus cards; `None` means there was nothing to show
    Dashboard(Option<ParsedRecommendations>),
    /// Cards only
    Cards(Vec<RecommendationCard>),
}

impl Report {
    pub fn is_empty(&self) -> bool {
        match self {
            Report::Dashboard(parsed) => parsed.is_none(),
            Report::Cards(cards) => cards.is_empty(),
        }
    }
}

/// Builder for fetching and parsing a recommendation report
#[derive(Default)]
pub struct SleepReportBuilder {
    source: Option<ReportSource>,
    view: Option<ParserKind>,
    default_effectiveness: Option<f64>,
    backend: Option<Arc<dyn SleepBackend>>,
}

impl SleepReportBuilder {
    /// Parse text that is already available
    ///
    /// # Example
    /// ```
    /// use sleep_insights::SleepReport;
    ///
    /// let builder = SleepReport::builder()
    ///     .text("1. 🌙 **Wind down**: Read before bed");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(ReportSource::Text(text.into()));
        self
    }

    /// Use the latest stored result of `email`
    pub fn latest_for(mut self, email: impl Into<String>) -> Self {
        self.source = Some(ReportSource::Latest {
            email: email.into(),
        });
        self
    }

    /// Submit questionnaire answers and parse the returned recommendations
    pub fn predict(mut self, email: impl Into<String>, answers: Answers) -> Self {
        self.source = Some(ReportSource::Prediction {
            email: email.into(),
            answers,
        });
        self
    }

    /// Render cards only, dropping items without a description
    ///
    /// # Example
    /// ```
    /// use sleep_insights::SleepReport;
    ///
    /// let builder = SleepReport::builder()
    ///     .text("1. 🌙 **Wind down**: Read before bed")
    ///     .cards();
    /// ```
    pub fn cards(mut self) -> Self {
        self.view = Some(ParserKind::Cards);
        self
    }

    pub fn view(mut self, view: ParserKind) -> Self {
        self.view = Some(view);
        self
    }

    /// Effectiveness shown when the text carries none
    ///
    /// Ignored for backend sources, which supply the stored percentage.
    pub fn default_effectiveness(mut self, value: f64) -> Self {
        self.default_effectiveness = Some(value);
        self
    }

    /// Use this backend instead of one built from configuration
    pub fn backend(mut self, backend: Arc<dyn SleepBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Resolve the source and parse it
    ///
    /// # Errors
    /// Returns `SleepError` if:
    /// - No source was specified
    /// - Configuration cannot be loaded when a backend is needed
    /// - The backend request fails
    ///
    /// # Example
    /// ```
    /// # use sleep_insights::{Report, SleepReport};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let report = SleepReport::builder()
    ///     .text("1. 🌙 **Wind down**: Read before bed")
    ///     .build()
    ///     .await?;
    /// assert!(!report.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Report, SleepError> {
        let source = self.source.ok_or_else(|| {
            SleepError::BuilderError(
                "No report source specified. Use .text(), .latest_for() or .predict()"
                    .to_string(),
            )
        })?;

        let (text, effectiveness) = match source {
            ReportSource::Text(text) => (Some(text), self.default_effectiveness),
            ReportSource::Latest { email } => {
                let backend = resolve_backend(self.backend)?;
                let results = backend.results(&email).await?;
                match latest_result(&results) {
                    Some(latest) => (
                        Some(latest.recommendations.clone()),
                        Some(latest.effectiveness_percentage),
                    ),
                    None => {
                        debug!("no stored results for {}", email);
                        (None, None)
                    }
                }
            }
            ReportSource::Prediction { email, answers } => {
                let backend = resolve_backend(self.backend)?;
                let prediction = backend.predict(&email, &answers).await?;
                (
                    Some(prediction.recommendations),
                    Some(prediction.effectiveness_percentage),
                )
            }
        };

        let options = effectiveness
            .map(ParseOptions::with_effectiveness)
            .unwrap_or_default();

        Ok(match self.view.unwrap_or_default() {
            ParserKind::Dashboard => Report::Dashboard(parsers::parse(text.as_deref(), &options)),
            ParserKind::Cards => Report::Cards(parsers::parse_cards(text.as_deref())),
        })
    }
}

fn resolve_backend(
    backend: Option<Arc<dyn SleepBackend>>,
) -> Result<Arc<dyn SleepBackend>, SleepError> {
    match backend {
        Some(backend) => Ok(backend),
        None => {
            let config = AppConfig::load()?;
            Ok(Arc::new(HttpBackend::new(&config.api)?))
        }
    }
}

/// Main entry point for the builder API
pub struct SleepReport;

impl SleepReport {
    /// Creates a new report builder
    pub fn builder() -> SleepReportBuilder {
        SleepReportBuilder::default()
    }
}
