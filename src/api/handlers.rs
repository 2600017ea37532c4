use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::alpaca::BarSource;
use crate::error::ForecastError;
use crate::forecast::SearchConfig;
use crate::handler::{self, ForecastBody, ForecastEvent};
use crate::models::Timeframe;

use super::responses::*;

/// Shared application state
pub struct AppState {
    pub source: Arc<dyn BarSource>,
    pub search: SearchConfig,
}

pub type SharedState = Arc<AppState>;

/// Convert ForecastError to HTTP response
impl IntoResponse for ForecastError {
    fn into_response(self) -> Response {
        let status = match &self {
            ForecastError::InvalidTimeframe(_) | ForecastError::InvalidDate(_) => {
                StatusCode::BAD_REQUEST
            }
            ForecastError::EmptySeries(_) => StatusCode::NOT_FOUND,
            ForecastError::DataFetch(_) | ForecastError::ApiStatus { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ForecastError::Fit(_) | ForecastError::MissingCredentials(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// Run a forecast
#[utoipa::path(
    post,
    path = "/api/v1/forecast",
    tag = "Forecast",
    request_body = ForecastEvent,
    responses(
        (status = 200, description = "Forecast produced", body = ForecastBody),
        (status = 400, description = "Invalid timeframe or date", body = ErrorResponse),
        (status = 404, description = "No bars for symbol", body = ErrorResponse),
        (status = 502, description = "Upstream data API failure", body = ErrorResponse),
        (status = 500, description = "Model fit failure", body = ErrorResponse)
    )
)]
pub async fn create_forecast(
    State(state): State<SharedState>,
    Json(event): Json<ForecastEvent>,
) -> Result<Json<ForecastBody>, ForecastError> {
    let body = handler::run(&event, state.source.as_ref(), &state.search).await?;
    Ok(Json(body))
}

/// List supported timeframes
#[utoipa::path(
    get,
    path = "/api/v1/timeframes",
    tag = "Forecast",
    responses(
        (status = 200, description = "Supported bar granularities", body = TimeframesResponse)
    )
)]
pub async fn list_timeframes() -> Json<TimeframesResponse> {
    Json(TimeframesResponse {
        timeframes: Timeframe::all().iter().map(|t| t.to_string()).collect(),
    })
}
