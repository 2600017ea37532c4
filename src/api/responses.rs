use serde::Serialize;
use utoipa::ToSchema;

/// Supported timeframes listing
#[derive(Debug, Serialize, ToSchema)]
pub struct TimeframesResponse {
    pub timeframes: Vec<String>,
}

/// Error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
