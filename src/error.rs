use thiserror::Error;

/// Errors raised around the parser: talking to the backend, loading
/// configuration and keeping the session. Parsing itself never fails.
#[derive(Error, Debug)]
pub enum SleepError {
    /// Transport-level failure talking to the backend
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with an error status or `success: false`
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Configured base URL cannot be used to build endpoint URLs
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Response or session body was not the expected JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Session file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Operation needs a logged-in user
    #[error("Not logged in")]
    NotLoggedIn,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let err: SleepError = config::ConfigError::Message("bad value".to_string()).into();
        assert!(matches!(err, SleepError::ConfigError(_)));
        assert_eq!(err.to_string(), "Configuration error: bad value");
    }

    #[test]
    fn test_api_error_message() {
        let err = SleepError::Api {
            status: 404,
            message: "User not found".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error (404): User not found");
    }
}
