//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use coopctl_domain::error::CoopError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`CoopError`] to an HTTP response with appropriate status code.
pub struct ApiError(CoopError);

impl From<CoopError> for ApiError {
    fn from(err: CoopError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CoopError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            CoopError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            CoopError::Sensor(err) => {
                tracing::error!(error = %err, "sensor read failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "sensor read failed".to_string(),
                )
            }
            CoopError::Output(err) => {
                tracing::error!(error = %err, "output write failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "output write failed".to_string(),
                )
            }
            CoopError::Feed(err) => {
                tracing::error!(error = %err, "flock feed error escaped the aggregator");
                (StatusCode::BAD_GATEWAY, "flock feed unavailable".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
