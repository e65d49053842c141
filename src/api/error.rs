//! Errors shared by the HTTP clients.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to a remote service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404 Not Found
    #[error("not found: {0}")]
    NotFound(String),

    /// 5xx Server Error
    #[error("server error ({0}): {1}")]
    Server(u16, String),

    /// Any other non-success status.
    #[error("HTTP error ({0}): {1}")]
    Http(u16, String),

    /// Network failure, including timeouts.
    #[error("request error: {0}")]
    Request(String),

    /// The body did not match the expected shape.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The service answered with an error payload.
    #[error("remote error: {0}")]
    Remote(Value),

    /// The service answered without the expected result.
    #[error("empty result from {0}")]
    EmptyResult(String),
}

impl ApiError {
    /// Build an error from a non-success HTTP status and its body.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        let code = status.as_u16();
        match code {
            404 => ApiError::NotFound(body),
            500..=599 => {
                tracing::warn!(status = code, body = %body, "Server error");
                ApiError::Server(code, body)
            }
            _ => ApiError::Http(code, body),
        }
    }
}

/// Result type for remote calls.
pub type ApiResult<T> = Result<T, ApiError>;
