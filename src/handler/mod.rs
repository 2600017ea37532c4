//! Forecast pipeline handler
//!
//! Parses the invocation event, fetches the symbol universe's bars, fits
//! the model search over the requested symbol's close prices, and shapes
//! the forecast into the response envelope.

pub mod event;

pub use event::{EnvelopeBody, ForecastBody, ForecastEvent, ForecastRecord, ResponseEnvelope};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use tracing::info;

use crate::alpaca::{BarSource, BarsRequest};
use crate::error::ForecastError;
use crate::forecast::{ModelSearch, SearchConfig};
use crate::models::Timeframe;

/// Steps predicted past the end of the observed series (one month of
/// hourly points)
pub const PREDICT_HORIZON: usize = 720;

/// Output timestamp format for forecast records
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an ISO date as New York local midnight
fn parse_local_date(s: &str) -> Result<chrono::DateTime<Tz>, ForecastError> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| ForecastError::InvalidDate(format!("{s}: {e}")))?;
    date.and_hms_opt(0, 0, 0)
        .and_then(|dt| dt.and_local_timezone(New_York).single())
        .ok_or_else(|| ForecastError::InvalidDate(s.to_string()))
}

/// Run the forecast pipeline for one event
pub async fn run(
    event: &ForecastEvent,
    source: &dyn BarSource,
    config: &SearchConfig,
) -> Result<ForecastBody, ForecastError> {
    let symbol = event.symbol.clone();
    info!(symbol = %symbol, "forecast requested");

    let start = parse_local_date(&event.start)?;
    let end = parse_local_date(&event.end)?;
    let timeframe = Timeframe::parse(&event.timeframe)?;
    info!(start = %start, end = %end, timeframe = %timeframe, "range resolved");

    let request = BarsRequest::universe(start, end, timeframe);
    let bars = source.fetch_bars(&request).await?;

    let symbol_bars: Vec<_> = bars.iter().filter(|b| b.symbol == symbol).collect();
    let last_timestamp: NaiveDateTime = symbol_bars
        .last()
        .map(|b| b.timestamp)
        .ok_or_else(|| ForecastError::EmptySeries(symbol.clone()))?;

    let closes: Vec<f64> = symbol_bars.iter().map(|b| b.close).collect();
    info!(symbol = %symbol, points = closes.len(), "fitting model search");

    let fitted = ModelSearch::new(config.clone()).fit(&closes)?;
    let prediction = fitted.predict(PREDICT_HORIZON);
    info!(model = fitted.best_model(), steps = PREDICT_HORIZON, "forecast produced");

    let step = Duration::seconds(timeframe.duration_seconds());
    let data = prediction
        .forecast
        .iter()
        .enumerate()
        .map(|(k, &close_price)| ForecastRecord {
            timestamp: (last_timestamp + step * (k as i32 + 1))
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            close_price,
        })
        .collect();

    Ok(ForecastBody { symbol, data })
}

/// Lambda-style entry point: any failure collapses into a 500 envelope
/// carrying the error's string form.
pub async fn lambda_handler(
    event: &ForecastEvent,
    source: &dyn BarSource,
    config: &SearchConfig,
) -> ResponseEnvelope {
    match run(event, source, config).await {
        Ok(body) => ResponseEnvelope::ok(body),
        Err(e) => {
            tracing::error!(error = %e, "forecast failed");
            ResponseEnvelope::error(&e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_local_date() {
        let dt = parse_local_date("2022-12-02").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.timezone(), New_York);
    }

    #[test]
    fn test_parse_local_date_rejects_garbage() {
        let err = parse_local_date("12/02/2022").unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
        assert!(parse_local_date("").is_err());
    }
}
