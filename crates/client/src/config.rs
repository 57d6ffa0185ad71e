use std::path::Path;
use std::time::Duration;

use alertcond_common::retry::RetryConfig;
use serde::{Deserialize, Serialize};

use crate::http::HttpAlertsClient;

pub const DEFAULT_API_URL: &str = "https://api.newrelic.com/v2";
pub const API_KEY_ENV: &str = "NEWRELIC_API_KEY";
pub const API_URL_ENV: &str = "NEWRELIC_API_URL";

/// Credentials and endpoint of the alerting API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("validation: {0}")]
    Validation(String),
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    pub fn load_from_str(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Builds the configuration from an optional YAML document, then layers
    /// `NEWRELIC_API_KEY` / `NEWRELIC_API_URL` from `lookup` over it.
    pub fn resolve<F>(yaml: Option<&str>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match yaml {
            Some(yaml) => serde_yaml::from_str(yaml)?,
            None => Self::new(String::new(), DEFAULT_API_URL),
        };
        cfg.apply_env_overrides(lookup);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Environment values take precedence over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_key = key;
        }
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.is_empty()) {
            self.api_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "api_key must not be empty (set {API_KEY_ENV})"
            )));
        }
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Validation("api_url must not be empty".into()));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "api_url {:?} must be an http(s) URL",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation("timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    pub fn client(&self) -> Result<HttpAlertsClient, ConfigError> {
        self.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;
        let client = HttpAlertsClient::with_client(&self.api_url, &self.api_key, http).with_retry(
            RetryConfig {
                max_attempts: self.max_attempts,
                ..Default::default()
            },
        );
        tracing::info!(api_url = %self.api_url, "alerting API client configured");
        Ok(client)
    }
}
