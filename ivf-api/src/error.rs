//! Error types for ivf-api
//!
//! Maps the shared error taxonomy onto HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Client exceeded the inbound rate limit (429)
    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// ivf-common error; status depends on the variant
    #[error(transparent)]
    Common(#[from] ivf_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use ivf_common::Error as Common;

        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::TooManyRequests(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg)
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg,
            ),
            ApiError::Common(err) => match err {
                Common::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
                Common::Config(msg) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    msg,
                ),
                Common::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
                Common::Database(ref e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    e.to_string(),
                ),
                Common::Io(ref e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    e.to_string(),
                ),
                Common::Internal(msg) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    msg,
                ),
            },
        };

        if status.is_server_error() {
            tracing::error!(code = error_code, "{}", message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::Common(ivf_common::Error::InvalidInput("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Common(ivf_common::Error::Config("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Common(ivf_common::Error::Upstream("x".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::TooManyRequests("x".into()),
                StatusCode::TOO_MANY_REQUESTS,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
