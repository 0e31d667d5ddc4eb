//! API client configuration

use crate::error::{ApiError, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.cloud.cmctelecom.vn/ver2";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_KEY: &str = "CMC_API_KEY";
pub const ENV_API_URL: &str = "CMC_API_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "CMC_REQUEST_TIMEOUT_SECS";

/// Connection settings for the CMC Cloud API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    /// Per-request HTTP timeout; task waits are governed by timing profiles
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Create ApiConfig from environment variables
    ///
    /// `CMC_API_KEY` is required; `CMC_API_URL` and `CMC_REQUEST_TIMEOUT_SECS`
    /// fall back to their defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| ApiError::MissingEnvVar(ENV_API_KEY.to_string()))?;

        let mut config = Self::new(api_key);

        if let Ok(url) = std::env::var(ENV_API_URL) {
            config.base_url = url;
        }

        if let Ok(raw) = std::env::var(ENV_REQUEST_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::InvalidConfig(format!(
                    "{} must be a number of seconds, got {:?}",
                    ENV_REQUEST_TIMEOUT, raw
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ApiError::InvalidConfig("API key is empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiError::InvalidConfig(format!(
                "API URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ApiError::InvalidConfig("request timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Endpoint URL for an action path (`{base}/{action}.json`)
    pub fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}.json",
            self.base_url.trim_end_matches('/'),
            action.trim_start_matches('/')
        )
    }
}
