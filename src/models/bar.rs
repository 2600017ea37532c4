use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// OHLCV (Open-High-Low-Close-Volume) bar
///
/// Timestamps are America/New_York local time with the offset stripped,
/// which is the shape the forecasting pipeline works on.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Bar {
    /// Trading symbol (e.g. AAPL)
    pub symbol: String,

    /// Bar open time, exchange-local, naive
    pub timestamp: NaiveDateTime,

    /// Opening price
    pub open: f64,

    /// Highest price in the interval
    pub high: f64,

    /// Lowest price in the interval
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Total volume traded in the interval
    pub volume: f64,

    /// Number of trades aggregated into this bar
    pub trade_count: u64,

    /// Volume-weighted average price
    pub vwap: f64,
}

impl Bar {
    /// Calculate bar body size (abs(close - open))
    pub fn body_size(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Calculate bar range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Check if bar is bullish (close > open)
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if bar is bearish (close < open)
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            symbol: "AAPL".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2023, 12, 6)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
            open,
            high,
            low,
            close,
            volume: 1_000_000.0,
            trade_count: 100,
            vwap: (open + close) / 2.0,
        }
    }

    #[test]
    fn test_bullish_bar() {
        let bar = create_test_bar(190.0, 191.5, 189.5, 191.0);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
        assert!((bar.body_size() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearish_bar() {
        let bar = create_test_bar(191.0, 191.5, 189.0, 189.5);
        assert!(!bar.is_bullish());
        assert!(bar.is_bearish());
        assert!((bar.body_size() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_bar_range() {
        let bar = create_test_bar(190.0, 192.0, 189.0, 191.0);
        assert!((bar.range() - 3.0).abs() < 1e-9);
    }
}
