use std::env;
use std::time::Duration;
use thiserror::Error;

pub const API_URL_VAR: &str = "LISTINGS_API_URL";
pub const TIMEOUT_VAR: &str = "LISTINGS_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("LISTINGS_API_URL is not set")]
    MissingApiUrl,

    #[error("invalid LISTINGS_TIMEOUT_SECS value {value:?}, expected whole seconds")]
    InvalidTimeout { value: String },
}

/// Settings for the remote listing source.
///
/// Handed to [`crate::loader::HttpSource::new`] explicitly; nothing in the
/// library reads the process environment on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base endpoint, e.g. `https://host/api/properties`
    pub api_url: String,
    /// No timeout unless one is configured
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            request_timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Read configuration from `LISTINGS_API_URL` and `LISTINGS_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingApiUrl)?;

        let mut config = Self::new(api_url);
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
