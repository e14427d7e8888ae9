/// Error types for Post Service
///
/// This module defines all error types that can occur in the service.
/// Errors are converted to JSON `{"error": message}` responses for API
/// clients.
use actix_web::{error::ResponseError, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

/// Result type for post-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed query parameter or missing required field
    #[error("{0}")]
    InvalidArgument(String),

    /// Referenced post does not exist
    #[error("{0}")]
    NotFound(String),

    /// Client exceeded the request rate limit
    #[error("Rate limit exceeded: {0} requests per {1} seconds")]
    RateLimited(u32, u64),

    /// Storage write failed; the commit was lost
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited(_, _) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Map malformed JSON request bodies to a 400 with our JSON error shape.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    AppError::InvalidArgument(err.to_string()).into()
}

/// Map path extraction failures (e.g. non-numeric `{id}`) to a 404, matching
/// the behavior of an integer path converter.
pub fn path_error_handler(
    _err: actix_web::error::PathError,
    _req: &HttpRequest,
) -> actix_web::Error {
    AppError::NotFound("Not Found".to_string()).into()
}
