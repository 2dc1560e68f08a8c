//! Error types and response handling for the score API.
//!
//! Provides HTTP status code mapping and JSON error response generation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::score::PayloadError;

/// Errors a score API request can end in.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body is not valid JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// `score` is present but unusable and the server rejects such payloads
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] PayloadError),
}

impl ApiError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error type string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::MalformedBody(_) => "malformed_body",
            ApiError::InvalidPayload(_) => "invalid_payload",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::warn!(
            request_id = %request_id,
            error_type = self.error_type(),
            "{}",
            self
        );

        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
                "request_id": request_id
            }
        });

        (self.status_code(), Json(body)).into_response()
    }
}
