use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::ForecastError;

/// Bar sampling timeframe enumeration
///
/// Represents the interval at which OHLCV bars are aggregated by the
/// market data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Timeframe {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl Timeframe {
    /// Canonical display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Minute => "Minute",
            Timeframe::Hour => "Hour",
            Timeframe::Day => "Day",
            Timeframe::Week => "Week",
            Timeframe::Month => "Month",
        }
    }

    /// Wire representation expected by the Alpaca data API
    pub fn api_str(&self) -> &'static str {
        match self {
            Timeframe::Minute => "1Min",
            Timeframe::Hour => "1Hour",
            Timeframe::Day => "1Day",
            Timeframe::Week => "1Week",
            Timeframe::Month => "1Month",
        }
    }

    /// Case-insensitive parse, `None` for unrecognized input
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "minute" => Some(Timeframe::Minute),
            "hour" => Some(Timeframe::Hour),
            "day" => Some(Timeframe::Day),
            "week" => Some(Timeframe::Week),
            "month" => Some(Timeframe::Month),
            _ => None,
        }
    }

    /// Parse with a descriptive error naming the valid set
    pub fn parse(s: &str) -> Result<Self, ForecastError> {
        Self::from_str(s).ok_or_else(|| ForecastError::InvalidTimeframe(s.to_string()))
    }

    /// Get all timeframe variants
    pub fn all() -> Vec<Self> {
        vec![
            Timeframe::Minute,
            Timeframe::Hour,
            Timeframe::Day,
            Timeframe::Week,
            Timeframe::Month,
        ]
    }

    /// Get duration in seconds (a month is taken as 30 days)
    pub fn duration_seconds(&self) -> i64 {
        match self {
            Timeframe::Minute => 60,
            Timeframe::Hour => 3600,
            Timeframe::Day => 86400,
            Timeframe::Week => 604800,
            Timeframe::Month => 2_592_000,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_as_str() {
        assert_eq!(Timeframe::Minute.as_str(), "Minute");
        assert_eq!(Timeframe::Hour.as_str(), "Hour");
        assert_eq!(Timeframe::Month.as_str(), "Month");
    }

    #[test]
    fn test_timeframe_api_str() {
        assert_eq!(Timeframe::Minute.api_str(), "1Min");
        assert_eq!(Timeframe::Hour.api_str(), "1Hour");
        assert_eq!(Timeframe::Week.api_str(), "1Week");
    }

    #[test]
    fn test_timeframe_from_str_case_insensitive() {
        assert_eq!(Timeframe::from_str("hour"), Some(Timeframe::Hour));
        assert_eq!(Timeframe::from_str("Hour"), Some(Timeframe::Hour));
        assert_eq!(Timeframe::from_str("HOUR"), Some(Timeframe::Hour));
        assert_eq!(Timeframe::from_str("minute"), Some(Timeframe::Minute));
        assert_eq!(Timeframe::from_str("WeEk"), Some(Timeframe::Week));
        assert_eq!(Timeframe::from_str("quarter"), None);
        assert_eq!(Timeframe::from_str(""), None);
    }

    #[test]
    fn test_timeframe_parse_error_names_valid_set() {
        let err = Timeframe::parse("fortnight").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("fortnight"));
        assert!(message.contains("Minute"));
        assert!(message.contains("Month"));
    }

    #[test]
    fn test_timeframe_duration() {
        assert_eq!(Timeframe::Minute.duration_seconds(), 60);
        assert_eq!(Timeframe::Hour.duration_seconds(), 3600);
        assert_eq!(Timeframe::Day.duration_seconds(), 86400);
        assert_eq!(Timeframe::Week.duration_seconds(), 604800);
    }

    #[test]
    fn test_timeframe_all() {
        let all = Timeframe::all();
        assert_eq!(all.len(), 5);
        assert!(all.contains(&Timeframe::Minute));
        assert!(all.contains(&Timeframe::Month));
    }
}
