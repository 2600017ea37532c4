//! Error types for the forecast pipeline
//!
//! This module centralizes all error types used across the bar fetch,
//! model search, and handler layers, making error handling consistent
//! across the codebase.

use thiserror::Error;

/// Errors that can occur while fetching bars or fitting a forecast
///
/// # Error Categories
///
/// - **Input Errors**: `InvalidTimeframe`, `InvalidDate`
/// - **Data Errors**: `DataFetch`, `ApiStatus`, `EmptySeries`
/// - **Model Errors**: `Fit`
/// - **Configuration Errors**: `MissingCredentials`, `HttpClient`
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Timeframe string did not match a recognized granularity
    #[error("Invalid timeframe: {0}. Please provide a timeframe one of the following: Minute, Hour, Day, Week, Month")]
    InvalidTimeframe(String),

    /// Start or end date could not be parsed or localized
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Transport-level failure talking to the market data API
    #[error("Market data request failed: {0}")]
    DataFetch(#[from] reqwest::Error),

    /// Market data API returned a non-success status
    #[error("Market data API error ({status}): {message}")]
    ApiStatus { status: u16, message: String },

    /// No bars remained after filtering to the requested symbol
    #[error("No bars returned for symbol: {0}")]
    EmptySeries(String),

    /// Model fitting or validation failed
    #[error("Model fit failed: {0}")]
    Fit(String),

    /// Required API credentials were not configured
    #[error("Missing credentials: {0} is not set")]
    MissingCredentials(&'static str),
}

impl ForecastError {
    /// Returns true if the error was caused by bad request input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ForecastError::InvalidTimeframe(_) | ForecastError::InvalidDate(_)
        )
    }

    /// Returns true if the error came from the upstream data API
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            ForecastError::DataFetch(_) | ForecastError::ApiStatus { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ForecastError::InvalidTimeframe("quarter".to_string());
        assert!(err.to_string().starts_with("Invalid timeframe: quarter"));
    }

    #[test]
    fn test_error_categories() {
        assert!(ForecastError::InvalidDate("not-a-date".to_string()).is_input_error());
        assert!(ForecastError::ApiStatus {
            status: 429,
            message: "too many requests".to_string()
        }
        .is_upstream_error());
        assert!(!ForecastError::EmptySeries("AAPL".to_string()).is_input_error());
    }
}
