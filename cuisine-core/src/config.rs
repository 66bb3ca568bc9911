//! Client configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },

    #[error("Invalid API URL {0}: expected http(s)://host")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the backend, without the `/api/v1` prefix.
    pub base_url: String,
    pub timeout: Duration,
    /// Directory holding the stored session token.
    pub home_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            home_dir: Self::default_home_dir(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `CUISINE_API_URL`: backend base URL (default: "http://localhost:5000")
    /// - `CUISINE_HTTP_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `CUISINE_HOME`: token directory (default: "~/.cuisine")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = match lookup("CUISINE_API_URL") {
            Some(value) => normalize_base_url(&value)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let timeout = match lookup("CUISINE_HTTP_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        var: "CUISINE_HTTP_TIMEOUT_SECS".to_string(),
                        value: value.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let home_dir = lookup("CUISINE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_home_dir);

        Ok(Self {
            base_url,
            timeout,
            home_dir,
        })
    }

    /// Replace the base URL, e.g. from a `--server` flag.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Get the default home directory: ~/.cuisine
    pub fn default_home_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".cuisine"))
            .unwrap_or_else(|| PathBuf::from(".cuisine"))
    }
}

/// Check that `raw` is an http(s) URL with a host and strip trailing slashes,
/// so paths can be joined onto it.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidApiUrl(raw.to_string());
    let parsed = url::Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(invalid());
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}
