//! Error handling for the Smart Farm Dashboard
//!
//! Provides consistent JSON error responses for the API surface. Sensor fetch
//! failures are normally absorbed by the demo-data fallback and never reach a
//! response; `AppError::Sensor` exists for callers that want the raw failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::external::thingspeak::FetchError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Sensor fetch failed: {0}")]
    Sensor(#[from] FetchError),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                },
            ),
            AppError::Sensor(err) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: err.code().to_string(),
                    message: err.to_string(),
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_errors_map_to_bad_gateway() {
        let errors = [
            FetchError::Timeout,
            FetchError::Connection("refused".into()),
            FetchError::Http { status: 404 },
            FetchError::NoData,
            FetchError::Validation("field1 is not numeric".into()),
        ];
        for err in errors {
            let response = AppError::Sensor(err).into_response();
            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn test_configuration_error_maps_to_internal() {
        let response = AppError::Configuration("read key missing".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
