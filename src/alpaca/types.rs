//! Wire types for the Alpaca Market Data v2 bars endpoint

use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::Bar;

/// One bar as returned by `GET /v2/stocks/bars`
#[derive(Debug, Clone, Deserialize)]
pub struct WireBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
    #[serde(rename = "n", default)]
    pub trade_count: u64,
    #[serde(rename = "vw", default)]
    pub vwap: f64,
}

impl WireBar {
    /// Convert to a domain [`Bar`], moving the timestamp to New York local
    /// time and stripping the offset for the modeling pipeline.
    pub fn into_bar(self, symbol: &str) -> Bar {
        Bar {
            symbol: symbol.to_string(),
            timestamp: self.timestamp.with_timezone(&New_York).naive_local(),
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            trade_count: self.trade_count,
            vwap: self.vwap,
        }
    }
}

/// Paged response envelope for the bars endpoint
#[derive(Debug, Deserialize)]
pub struct BarsPage {
    /// Bars keyed by symbol; absent when a page is empty
    #[serde(default)]
    pub bars: HashMap<String, Vec<WireBar>>,
    /// Opaque cursor for the next page, `None` on the last page
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_bar_deserialization() {
        let json = r#"{
            "t": "2023-12-06T17:30:00Z",
            "o": 192.0, "h": 193.5, "l": 191.2, "c": 193.1,
            "v": 1200345.0, "n": 8432, "vw": 192.61
        }"#;
        let wire: WireBar = serde_json::from_str(json).unwrap();
        assert_eq!(wire.close, 193.1);
        assert_eq!(wire.trade_count, 8432);
    }

    #[test]
    fn test_into_bar_converts_to_new_york_naive() {
        let json = r#"{"t": "2023-12-06T17:30:00Z", "o": 1.0, "h": 1.0, "l": 1.0, "c": 1.0, "v": 0.0}"#;
        let wire: WireBar = serde_json::from_str(json).unwrap();
        let bar = wire.into_bar("AAPL");
        // 17:30 UTC is 12:30 in New York during EST
        assert_eq!(bar.timestamp.to_string(), "2023-12-06 12:30:00");
        assert_eq!(bar.symbol, "AAPL");
    }

    #[test]
    fn test_bars_page_missing_fields_default() {
        let page: BarsPage = serde_json::from_str(r#"{"next_page_token": null}"#).unwrap();
        assert!(page.bars.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
