use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::model::DEFAULT_EFFECTIVENESS;
use crate::parsers::ParserKind;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Sleep analysis backend
    #[serde(default)]
    pub api: ApiConfig,
    /// Recommendation parsing defaults
    #[serde(default)]
    pub parser: ParserConfig,
    /// Where the logged-in user is remembered
    #[serde(default)]
    pub session: SessionConfig,
}

/// Configuration for the backend connection
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend, without the `/api` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Configuration for the recommendation parser
#[derive(Debug, Deserialize, Clone)]
pub struct ParserConfig {
    /// Effectiveness shown when the text carries none
    #[serde(default = "default_effectiveness")]
    pub default_effectiveness: f64,
    /// Variant used when the caller does not pick one
    #[serde(default)]
    pub view: ParserKind,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_effectiveness: default_effectiveness(),
            view: ParserKind::default(),
        }
    }
}

/// Configuration for the session cache
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// JSON file holding the current user
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_effectiveness() -> f64 {
    DEFAULT_EFFECTIVENESS
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".sleep-session.json")
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SLEEP__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SLEEP__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: SLEEP__API__BASE_URL
        .add_source(
            Environment::with_prefix("SLEEP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_values() {
        assert_eq!(default_base_url(), "http://localhost:5000");
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_effectiveness(), 51.2);
        assert_eq!(default_session_path(), PathBuf::from(".sleep-session.json"));
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.parser.view, ParserKind::Dashboard);
        assert_eq!(config.parser.default_effectiveness, 51.2);
    }

    #[test]
    fn test_load_config_without_file() {
        let keys_to_clear: Vec<String> = env::vars()
            .filter(|(k, _)| k.starts_with("SLEEP__"))
            .map(|(k, _)| k)
            .collect();

        for key in keys_to_clear {
            env::remove_var(&key);
        }

        // Every section has defaults, so an empty source set still loads
        let config = load_config().unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_parser_view_from_toml() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                "[parser]\nview = \"cards\"\ndefault_effectiveness = 40.5\n\n[api]\nbase_url = \"http://backend:8080\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.parser.view, ParserKind::Cards);
        assert_eq!(config.parser.default_effectiveness, 40.5);
        assert_eq!(config.api.base_url, "http://backend:8080");
        assert_eq!(config.api.timeout, 30);
    }
}
