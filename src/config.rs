//! Application configuration derived from environment variables.
//!
//! Variable names are kept compatible with the original batch job so an
//! existing `.env` file can be reused as-is.

use std::env;
use std::time::Duration;

use crate::alpaca::{AlpacaSettings, DEFAULT_DATA_URL};
use crate::error::ForecastError;
use crate::forecast::SearchConfig;

/// Service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Alpaca data API base URL
    pub data_url: String,
    /// API key id; required for live fetches
    pub api_key: Option<String>,
    /// API secret; required for live fetches
    pub api_secret: Option<String>,
    /// HTTP server bind address
    pub bind: String,
    /// Outbound request timeout
    pub http_timeout_secs: u64,
    /// Model search parameters
    pub search: SearchConfig,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        Self {
            data_url: env_str("ALPACA_DATA_URL", DEFAULT_DATA_URL),
            api_key: env::var("ALPACA_API_KEY").ok().filter(|s| !s.is_empty()),
            api_secret: env::var("ALPACA_API_SECRET").ok().filter(|s| !s.is_empty()),
            bind: env_str("BIND_ADDR", "127.0.0.1:3000"),
            http_timeout_secs: env_u64("HTTP_TIMEOUT_SECS", 30),
            search: SearchConfig::default(),
        }
    }

    /// Build Alpaca client settings, failing if credentials are missing
    pub fn alpaca_settings(&self) -> Result<AlpacaSettings, ForecastError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or(ForecastError::MissingCredentials("ALPACA_API_KEY"))?;
        let api_secret = self
            .api_secret
            .clone()
            .ok_or(ForecastError::MissingCredentials("ALPACA_API_SECRET"))?;

        Ok(AlpacaSettings {
            data_url: self.data_url.clone(),
            api_key,
            api_secret,
            timeout: Duration::from_secs(self.http_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_is_an_error() {
        let config = AppConfig {
            data_url: DEFAULT_DATA_URL.to_string(),
            api_key: None,
            api_secret: None,
            bind: "127.0.0.1:3000".to_string(),
            http_timeout_secs: 30,
            search: SearchConfig::default(),
        };
        let err = config.alpaca_settings().unwrap_err();
        assert!(err.to_string().contains("ALPACA_API_KEY"));
    }

    #[test]
    fn test_settings_built_when_credentials_present() {
        let config = AppConfig {
            data_url: "http://localhost:8080".to_string(),
            api_key: Some("key".to_string()),
            api_secret: Some("secret".to_string()),
            bind: "127.0.0.1:3000".to_string(),
            http_timeout_secs: 5,
            search: SearchConfig::default(),
        };
        let settings = config.alpaca_settings().unwrap();
        assert_eq!(settings.data_url, "http://localhost:8080");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }
}
