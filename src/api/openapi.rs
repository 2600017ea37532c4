use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::responses::*;
use crate::handler::{ForecastBody, ForecastEvent, ForecastRecord};
use crate::models::{Bar, Timeframe};

/// OpenAPI specification
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stock Forecast API",
        version = "1.0.0",
        description = "Fetches historical stock bars and returns an auto-selected time-series forecast",
        license(
            name = "MIT"
        )
    ),
    paths(
        handlers::health_check,
        handlers::create_forecast,
        handlers::list_timeframes,
    ),
    components(
        schemas(
            Timeframe,
            Bar,
            ForecastEvent,
            ForecastRecord,
            ForecastBody,
            TimeframesResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Forecast", description = "Bar forecast endpoints"),
    )
)]
pub struct ApiDoc;
