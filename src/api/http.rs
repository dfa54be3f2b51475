use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::{Answers, HealthStatus, Prediction, Question, QuizResult, SleepBackend, User};
use crate::config::ApiConfig;
use crate::SleepError;

/// [`SleepBackend`] over plain HTTP/JSON.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct AccountResponse {
    #[serde(default)]
    success: bool,
    user: Option<User>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    success: bool,
    #[serde(flatten)]
    prediction: Option<Prediction>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct QuestionsResponse {
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    results: Vec<QuizResult>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    reply: String,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translated_text: String,
}

impl HttpBackend {
    /// Create a backend client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, SleepError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SleepError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SleepError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { client, base_url })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: &str) -> Result<Self, SleepError> {
        Self::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    /// `<base>/api/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SleepError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SleepError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, SleepError> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        decode(self.client.get(url).send().await?).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: serde_json::Value,
    ) -> Result<T, SleepError> {
        let url = self.endpoint(segments)?;
        debug!("POST {}", url);
        decode(self.client.post(url).json(&body).send().await?).await
    }

    async fn account(&self, path: &str, body: serde_json::Value) -> Result<User, SleepError> {
        let response: AccountResponse = self.post(&[path], body).await?;
        match response {
            AccountResponse {
                success: true,
                user: Some(user),
                ..
            } => Ok(user),
            AccountResponse { error, .. } => Err(rejected(error)),
        }
    }
}

/// Map non-2xx statuses to [`SleepError::Api`] and decode the body otherwise.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SleepError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        warn!("backend returned {}: {}", status, message);
        return Err(SleepError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// 2xx body that still reports failure.
fn rejected(error: Option<String>) -> SleepError {
    SleepError::Api {
        status: 200,
        message: error.unwrap_or_else(|| "request was not successful".to_string()),
    }
}

#[async_trait]
impl SleepBackend for HttpBackend {
    async fn health(&self) -> Result<HealthStatus, SleepError> {
        self.get(&["health"]).await
    }

    async fn questions(&self) -> Result<Vec<Question>, SleepError> {
        let response: QuestionsResponse = self.get(&["questions"]).await?;
        Ok(response.questions)
    }

    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, SleepError> {
        self.account(
            "signup",
            json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, SleepError> {
        self.account("login", json!({ "email": email, "password": password }))
            .await
    }

    async fn predict(&self, email: &str, answers: &Answers) -> Result<Prediction, SleepError> {
        let response: PredictResponse = self
            .post(&["predict"], json!({ "email": email, "answers": answers }))
            .await?;
        match response {
            PredictResponse {
                success: true,
                prediction: Some(prediction),
                ..
            } => Ok(prediction),
            PredictResponse { error, .. } => Err(rejected(error)),
        }
    }

    async fn results(&self, email: &str) -> Result<Vec<QuizResult>, SleepError> {
        let response: ResultsResponse = self.get(&["results", email]).await?;
        if !response.success {
            return Err(rejected(response.error));
        }
        Ok(response.results)
    }

    async fn chat(&self, message: &str) -> Result<String, SleepError> {
        let response: ChatResponse = self.post(&["chat"], json!({ "message": message })).await?;
        Ok(response.reply)
    }

    async fn translate(&self, message: &str, lang: &str) -> Result<String, SleepError> {
        let response: TranslateResponse = self
            .post(&["translate"], json!({ "message": message, "lang": lang }))
            .await?;
        Ok(response.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(
            HttpBackend::with_base_url("not a url"),
            Err(SleepError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpBackend::with_base_url("mailto:someone@example.com"),
            Err(SleepError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_encodes_email_segment() {
        let backend = HttpBackend::with_base_url("http://localhost:5000").unwrap();
        let url = backend.endpoint(&["results", "a b/c@example.com"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/results/a%20b%2Fc@example.com"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let backend = HttpBackend::with_base_url("http://host/sleep/").unwrap();
        let url = backend.endpoint(&["health"]).unwrap();
        assert_eq!(url.as_str(), "http://host/sleep/api/health");
    }
}
