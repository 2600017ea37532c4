use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, SharedState};
use super::openapi::ApiDoc;

/// Create the API router with Swagger UI
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Health endpoint
        .route("/health", get(handlers::health_check))
        // Forecast endpoints
        .route("/api/v1/forecast", post(handlers::create_forecast))
        .route("/api/v1/timeframes", get(handlers::list_timeframes))
        .with_state(state)
}
