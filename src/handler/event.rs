//! Invocation event and response envelope
//!
//! The event mirrors the batch-job invocation shape: every field is
//! optional and falls back to a documented default.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Forecast invocation event
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ForecastEvent {
    /// Trading symbol to forecast
    #[serde(default = "default_symbol")]
    #[schema(example = "AAPL")]
    pub symbol: String,

    /// Range start, ISO date (YYYY-MM-DD), New York local
    #[serde(default = "default_start")]
    #[schema(example = "2022-12-02")]
    pub start: String,

    /// Range end, ISO date (YYYY-MM-DD), New York local
    #[serde(default = "default_end")]
    #[schema(example = "2023-12-07")]
    pub end: String,

    /// Bar granularity: Minute, Hour, Day, Week or Month (case-insensitive)
    #[serde(default = "default_timeframe")]
    #[schema(example = "Hour")]
    pub timeframe: String,
}

fn default_symbol() -> String {
    "AAPL".to_string()
}

fn default_start() -> String {
    "2022-12-02".to_string()
}

fn default_end() -> String {
    "2023-12-07".to_string()
}

fn default_timeframe() -> String {
    "Hour".to_string()
}

impl Default for ForecastEvent {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            start: default_start(),
            end: default_end(),
            timeframe: default_timeframe(),
        }
    }
}

/// One forecast step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastRecord {
    /// Forecast timestamp, `YYYY-MM-DD HH:MM:SS`, New York local
    #[schema(example = "2023-12-07 13:00:00")]
    pub timestamp: String,

    /// Predicted closing price
    #[serde(rename = "close price")]
    #[schema(example = 193.42)]
    pub close_price: f64,
}

/// Successful forecast payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForecastBody {
    pub symbol: String,
    pub data: Vec<ForecastRecord>,
}

/// Lambda-style response envelope
///
/// On success the body is the forecast object; on failure it is a JSON
/// string of the form `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: EnvelopeBody,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EnvelopeBody {
    Success(ForecastBody),
    Error(String),
}

impl ResponseEnvelope {
    pub fn ok(body: ForecastBody) -> Self {
        Self {
            status_code: 200,
            body: EnvelopeBody::Success(body),
        }
    }

    pub fn error(message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self {
            status_code: 500,
            body: EnvelopeBody::Error(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_defaults_applied_when_fields_omitted() {
        let event: ForecastEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event.symbol, "AAPL");
        assert_eq!(event.start, "2022-12-02");
        assert_eq!(event.end, "2023-12-07");
        assert_eq!(event.timeframe, "Hour");
    }

    #[test]
    fn test_event_partial_override() {
        let event: ForecastEvent =
            serde_json::from_str(r#"{"symbol": "TSLA", "timeframe": "day"}"#).unwrap();
        assert_eq!(event.symbol, "TSLA");
        assert_eq!(event.timeframe, "day");
        assert_eq!(event.start, "2022-12-02");
    }

    #[test]
    fn test_record_serializes_with_spaced_key() {
        let record = ForecastRecord {
            timestamp: "2023-12-07 13:00:00".to_string(),
            close_price: 193.42,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["close price"], 193.42);
        assert_eq!(json["timestamp"], "2023-12-07 13:00:00");
    }

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ResponseEnvelope::ok(ForecastBody {
            symbol: "AAPL".to_string(),
            data: vec![],
        });
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["body"]["symbol"], "AAPL");
        assert!(json["body"]["data"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_error_envelope_body_is_json_string() {
        let envelope = ResponseEnvelope::error("boom");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["statusCode"], 500);
        let body = json["body"].as_str().unwrap();
        let inner: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(inner["error"], "boom");
    }
}
