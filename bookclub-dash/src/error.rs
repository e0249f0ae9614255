//! Error types for bookclub-dash

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the dashboard service
#[derive(Error, Debug)]
pub enum Error {
    /// Errors raised by shared schedule/config code
    #[error(transparent)]
    Common(#[from] bookclub_common::Error),

    /// Transport-level HTTP failure talking to an external service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// External service answered with a non-success status
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record store answered successfully but without the expected row
    #[error("Record store error: {0}")]
    Store(String),
}

/// Convenience Result type using the dashboard Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
