use std::env;
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Host links are minted under unless overridden.
pub const DEFAULT_BASE_URL: &str = "https://codeshare.sarthaks.tech";
/// Snippet store request timeout unless overridden.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BASE_URL_ENV: &str = "CODESHARE_BASE_URL";
const TIMEOUT_ENV: &str = "CODESHARE_TIMEOUT_SECS";

/// Runtime settings for the share flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL for links and the snippet API, without trailing slash.
    pub base_url: String,
    /// Snippet store request timeout.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load settings from `CODESHARE_BASE_URL` and `CODESHARE_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            config = config.with_base_url(&base_url)?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|value| !value.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| Error::InvalidConfig {
                    key: TIMEOUT_ENV,
                    value: raw.clone(),
                    reason: "expected a positive number of seconds".into(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Replace the base URL after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] unless the value is an absolute
    /// `http`/`https` URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidConfig {
            key: BASE_URL_ENV,
            value: base_url.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(base_url.trim()).map_err(|err| invalid(&err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("only http(s) URLs are supported"));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("query strings and fragments are not allowed"));
        }

        self.base_url = base_url.trim().trim_end_matches('/').to_string();
        Ok(self)
    }
}
