//! Alpaca historical data client
//!
//! Fetches OHLCV bars from the Alpaca Market Data v2 REST API, following
//! `next_page_token` until the full range is assembled.

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::ForecastError;
use crate::models::{Bar, Timeframe};

use super::types::BarsPage;

/// Default Alpaca data API base URL
pub const DEFAULT_DATA_URL: &str = "https://data.alpaca.markets";

/// Symbol universe fetched on every request; the handler filters to one
pub const DEFAULT_SYMBOLS: [&str; 15] = [
    "AAPL", "IEX", "TSLA", "MSFT", "FB", "GOOGL", "AMZN", "NFLX", "AMD", "NVDA", "CSCO", "TMDX",
    "FATH", "ONHO", "DDOG",
];

/// Maximum bars per page requested from the API
const PAGE_LIMIT: u32 = 10_000;

/// Parameters for a historical bars request
#[derive(Debug, Clone)]
pub struct BarsRequest {
    pub symbols: Vec<String>,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub timeframe: Timeframe,
}

impl BarsRequest {
    /// Request the default symbol universe over a range
    pub fn universe(start: DateTime<Tz>, end: DateTime<Tz>, timeframe: Timeframe) -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            start,
            end,
            timeframe,
        }
    }
}

/// Source of historical bars
///
/// Seam between the handler pipeline and the concrete data provider so
/// tests can run against canned data.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Fetch all bars matching the request, sorted by symbol then timestamp
    async fn fetch_bars(&self, request: &BarsRequest) -> Result<Vec<Bar>, ForecastError>;
}

/// Alpaca client settings
#[derive(Debug, Clone)]
pub struct AlpacaSettings {
    /// Data API base URL
    pub data_url: String,
    /// API key id (APCA-API-KEY-ID header)
    pub api_key: String,
    /// API secret (APCA-API-SECRET-KEY header)
    pub api_secret: String,
    /// Per-request timeout
    pub timeout: Duration,
}

/// Alpaca market data provider
pub struct AlpacaClient {
    http: reqwest::Client,
    settings: AlpacaSettings,
}

impl AlpacaClient {
    /// Create a new client with the given settings
    pub fn new(settings: AlpacaSettings) -> Result<Self, ForecastError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    async fn fetch_page(
        &self,
        request: &BarsRequest,
        page_token: Option<&str>,
    ) -> Result<BarsPage, ForecastError> {
        let url = format!("{}/v2/stocks/bars", self.settings.data_url);

        let mut query: Vec<(&str, String)> = vec![
            ("symbols", request.symbols.join(",")),
            ("start", request.start.to_rfc3339()),
            ("end", request.end.to_rfc3339()),
            ("timeframe", request.timeframe.api_str().to_string()),
            ("limit", PAGE_LIMIT.to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("page_token", token.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .header("APCA-API-KEY-ID", &self.settings.api_key)
            .header("APCA-API-SECRET-KEY", &self.settings.api_secret)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ForecastError::ApiStatus {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<BarsPage>().await?)
    }
}

#[async_trait]
impl BarSource for AlpacaClient {
    async fn fetch_bars(&self, request: &BarsRequest) -> Result<Vec<Bar>, ForecastError> {
        let mut bars: Vec<Bar> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(request, page_token.as_deref()).await?;
            pages += 1;

            for (symbol, wire_bars) in page.bars {
                debug!(symbol = %symbol, count = wire_bars.len(), "received bars page");
                bars.extend(wire_bars.into_iter().map(|w| w.into_bar(&symbol)));
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        bars.sort_by(|a, b| (a.symbol.as_str(), a.timestamp).cmp(&(b.symbol.as_str(), b.timestamp)));

        info!(
            total = bars.len(),
            pages,
            timeframe = %request.timeframe,
            "historical bars fetched"
        );

        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    #[test]
    fn test_universe_request_uses_default_symbols() {
        let start = New_York.with_ymd_and_hms(2022, 12, 2, 0, 0, 0).unwrap();
        let end = New_York.with_ymd_and_hms(2023, 12, 7, 0, 0, 0).unwrap();
        let request = BarsRequest::universe(start, end, Timeframe::Hour);
        assert_eq!(request.symbols.len(), 15);
        assert!(request.symbols.contains(&"AAPL".to_string()));
        assert!(request.symbols.contains(&"DDOG".to_string()));
    }
}
