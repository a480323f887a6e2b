use anyhow::{Context, Result};
use std::time::Duration;

/// Environment variable naming the backend base URL.
pub const API_URL_ENV: &str = "CLIPHUB_API_URL";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;

/// API client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Timeout for ordinary JSON endpoints. Expiry surfaces as a normalized
    /// transport error; nothing is retried.
    pub request_timeout: Duration,
    /// Timeout for media uploads, which carry large payloads.
    pub upload_timeout: Duration,
}

impl Config {
    /// Creates a configuration with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// A missing base URL is a fatal setup error; there is no default to
    /// fall back to.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV)
            .with_context(|| format!("{API_URL_ENV} environment variable is not defined"))?;
        Ok(Self::new(base_url))
    }
}
