//! API error types with HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use broker::PublishError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use transfers::TransferError;

/// Structured error body returned to HTTP callers.
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub details: String,
}

/// API-level error type that maps to HTTP responses.
///
/// `details` carries the request path the error occurred on, matching the
/// error body contract.
#[derive(Debug)]
pub enum ApiError {
    /// Publishing a product event failed on the synchronous path.
    Publish {
        source: PublishError,
        details: &'static str,
    },
    /// A transfer failed.
    Transfer {
        source: TransferError,
        details: &'static str,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (message, details) = match self {
            ApiError::Publish { source, details } => (source.to_string(), details),
            ApiError::Transfer { source, details } => (source.to_string(), details),
        };

        tracing::error!(error = %message, details, "request failed");

        let body = ErrorMessage {
            timestamp: Utc::now(),
            message,
            details: details.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn publish_error_maps_to_500_with_details() {
        let error = ApiError::Publish {
            source: PublishError::Timeout(Duration::from_secs(5)),
            details: "/products/sync",
        };

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_message_serializes_expected_fields() {
        let body = ErrorMessage {
            timestamp: Utc::now(),
            message: "boom".to_string(),
            details: "/products/sync".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "boom");
        assert_eq!(json["details"], "/products/sync");
        assert!(json["timestamp"].is_string());
    }
}
