//! Mapping of pipeline errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kahovitz_error::KahovitzError;
use serde_json::json;
use tracing::error;

/// Error returned by a handler.
///
/// Validation errors become `400 {error}`; everything else becomes
/// `500 {error, details}` with the provider's diagnostic payload when known.
#[derive(Debug, derive_more::Display)]
#[display("{}", _0)]
pub struct ApiError(pub KahovitzError);

impl From<KahovitzError> for ApiError {
    fn from(err: KahovitzError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status == StatusCode::BAD_REQUEST {
            json!({ "error": self.0.message() })
        } else {
            error!(error = %self.0, "Request failed");
            json!({
                "error": self.0.message(),
                "details": self
                    .0
                    .details()
                    .unwrap_or_else(|| "No additional details available".to_string()),
            })
        };
        (status, Json(body)).into_response()
    }
}
