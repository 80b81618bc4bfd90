/// Client configuration loaded from the environment
use crate::error::{SpotError, SpotResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default base URL of the SPOT REST API.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default location of the local SQLite store.
pub const DEFAULT_STORE_PATH: &str = "spot.db";

/// Configuration for the SPOT client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every resource path is joined onto (e.g. `http://host:8080/api`)
    pub api_url: String,
    /// Total request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Path of the SQLite file holding the session and activity log
    pub store_path: PathBuf,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(10),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            user_agent: format!("spot/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from `.env` (if present) and the process environment.
    ///
    /// Recognized variables:
    /// * `SPOT_API_URL` - base URL of the backend API
    /// * `SPOT_TIMEOUT_SECS` - request timeout in seconds
    /// * `SPOT_STORE_PATH` - path of the local SQLite store
    /// * `SPOT_USER_AGENT` - user agent override
    pub fn from_env() -> SpotResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = env::var("SPOT_API_URL") {
            config.api_url = url;
        }

        if let Ok(raw) = env::var("SPOT_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| SpotError::Config {
                message: format!("SPOT_TIMEOUT_SECS must be a whole number, got {raw:?}"),
            })?;
            if secs == 0 {
                return Err(SpotError::Config {
                    message: "SPOT_TIMEOUT_SECS must be greater than zero".to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(path) = env::var("SPOT_STORE_PATH") {
            config.store_path = PathBuf::from(path);
        }

        if let Ok(agent) = env::var("SPOT_USER_AGENT") {
            config.user_agent = agent;
        }

        config.validate()?;
        Ok(config)
    }

    /// Creates a config pointing at a specific API base URL.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SpotResult<()> {
        let parsed = url::Url::parse(&self.api_url).map_err(|e| SpotError::Config {
            message: format!("SPOT_API_URL is not a valid URL: {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SpotError::Config {
                message: format!("unsupported API scheme {}", parsed.scheme()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = ClientConfig::with_api_url("ftp://example.com/api");
        assert!(matches!(config.validate(), Err(SpotError::Config { .. })));
    }
}
