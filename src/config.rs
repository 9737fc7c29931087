//! Client configuration.
//!
//! All settings a client needs live in [`ClientConfig`], which is handed to
//! [`crate::InsightlyClient::from_config`]. Nothing is read from process-wide
//! state after construction.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{InsightlyError, Result};

/// Base URL used when neither `INSIGHTLY_API_URL` nor `INSIGHTLY_POD` is set.
pub const DEFAULT_API_URL: &str = "https://api.insightly.com/v3.1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Connection settings for an Insightly account.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: Url,
    timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Create a configuration for the given API key and base URL.
    ///
    /// A trailing `/` is added to the base URL when missing so that relative
    /// endpoint paths join underneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: Url::parse(&base_url_str)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read configuration from environment variables.
    ///
    /// - `INSIGHTLY_API_KEY` (required)
    /// - `INSIGHTLY_API_URL` (optional full base URL)
    /// - `INSIGHTLY_POD` (optional pod name, e.g. `na1`, used when no URL is given)
    /// - `INSIGHTLY_TIMEOUT_SECS` (optional request timeout)
    ///
    /// # Errors
    ///
    /// Returns an error if `INSIGHTLY_API_KEY` is not set or a value is malformed.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("INSIGHTLY_API_KEY").map_err(|_| {
            InsightlyError::ConfigMissing(
                "INSIGHTLY_API_KEY environment variable not set".to_string(),
            )
        })?;

        let base_url = match (env::var("INSIGHTLY_API_URL"), env::var("INSIGHTLY_POD")) {
            (Ok(url), _) => url,
            (Err(_), Ok(pod)) => pod_url(&pod),
            _ => DEFAULT_API_URL.to_string(),
        };

        let config = Self::new(&api_key, &base_url)?;

        match env::var("INSIGHTLY_TIMEOUT_SECS") {
            Ok(raw) => Ok(config.with_timeout(parse_timeout(&raw)?)),
            Err(_) => Ok(config),
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Base URL for a named Insightly pod.
pub fn pod_url(pod: &str) -> String {
    format!("https://api.{}.insightly.com/v3.1", pod.trim().to_lowercase())
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(InsightlyError::ConfigMissing(format!(
            "INSIGHTLY_TIMEOUT_SECS must be a positive number of seconds, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let a = ClientConfig::new("key", "https://api.na1.insightly.com/v3.1").unwrap();
        let b = ClientConfig::new("key", "https://api.na1.insightly.com/v3.1/").unwrap();
        assert_eq!(a.base_url().as_str(), b.base_url().as_str());
        assert!(a.base_url().as_str().ends_with("/v3.1/"));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ClientConfig::new("key", "not a url");
        assert!(matches!(result, Err(InsightlyError::UrlError(_))));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = ClientConfig::new("secret-key", DEFAULT_API_URL).unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("base_url"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_pod_url() {
        assert_eq!(pod_url("NA1"), "https://api.na1.insightly.com/v3.1");
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_with_timeout() {
        let config = ClientConfig::new("key", DEFAULT_API_URL)
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
