//! Error handling for the Skymood API
//!
//! One error enum for every client-facing failure, with HTTP status mapping
//! through Axum's IntoResponse trait. Upstream client crates keep their own
//! error types; the service layer maps them onto this taxonomy.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short human-readable summary
    pub error: String,
    /// Error code for client-side handling
    pub code: &'static str,
    /// Full error message
    pub details: String,
}

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Validation Errors ==========
    /// Request validation failed
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Invalid request body format
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ========== Upstream Errors ==========
    /// Upstream provider could not be reached (connect, DNS, timeout)
    #[error("upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream provider rejected our credentials
    #[error("upstream authentication failed: {0}")]
    UpstreamAuth(String),

    /// Upstream provider returned an unexpected response
    #[error("upstream service error: {0}")]
    Upstream(String),

    // ========== Configuration Errors ==========
    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            Self::ValidationError(_) | Self::InvalidBody(_) | Self::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }

            // 401 Unauthorized
            Self::UpstreamAuth(_) => StatusCode::UNAUTHORIZED,

            // 404 Not Found
            Self::NotFound { .. } => StatusCode::NOT_FOUND,

            // 503 Service Unavailable
            Self::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Upstream(_) | Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamAuth(_) => "UPSTREAM_AUTH_ERROR",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Short summary used as the `error` field of the response body
    pub fn summary(&self) -> String {
        match self {
            Self::ValidationError(_) | Self::InvalidBody(_) | Self::MissingField(_) => {
                "Invalid request".to_string()
            }
            Self::NotFound { resource_type, .. } => {
                let mut chars = resource_type.chars();
                match chars.next() {
                    Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
                    None => "Not found".to_string(),
                }
            }
            Self::UpstreamUnavailable(_) => "Upstream service unavailable".to_string(),
            Self::UpstreamAuth(_) => "Upstream authentication failed".to_string(),
            Self::Upstream(_) => "Upstream service error".to_string(),
            Self::Configuration(_) => "Internal server error".to_string(),
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Upstream credentials rejected"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let error_response = ErrorResponse {
            error: self.summary(),
            code: self.error_code(),
            details: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

// ========== Conversion Implementations ==========

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingField("city").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("city", "Nowhereville").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::UpstreamUnavailable("timeout".to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::UpstreamAuth("rejected".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Upstream("bad gateway".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ApiError::UpstreamUnavailable(String::new()).error_code(),
            "UPSTREAM_UNAVAILABLE"
        );
        assert_eq!(
            ApiError::UpstreamAuth(String::new()).error_code(),
            "UPSTREAM_AUTH_ERROR"
        );
        assert_eq!(
            ApiError::not_found("city", "x").error_code(),
            "NOT_FOUND"
        );
    }

    #[test]
    fn test_not_found_summary_is_capitalized() {
        let err = ApiError::not_found("city", "Nowhereville");
        assert_eq!(err.summary(), "City not found");
        assert_eq!(err.to_string(), "city not found: Nowhereville");
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response = ApiError::MissingField("city").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Invalid request");
        assert_eq!(json["code"], "MISSING_FIELD");
        assert_eq!(json["details"], "missing required field: city");
    }
}
