//! Error types for the CRM server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::Envelope;

/// Message sent for every internal failure; the cause only goes to the log.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

// == App Error Enum ==
/// Unified error type for the CRM server.
///
/// Every variant carries the user-facing message; the HTTP status is
/// derived from the variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed JSON or form data
    #[error("{0}")]
    BadRequest(String),

    /// Missing, malformed, badly signed or expired token
    #[error("{0}")]
    Unauthorized(String),

    /// Unknown identifier
    #[error("{0}")]
    NotFound(String),

    /// Route exists but not for this method
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Content-Type not handled by the route
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Input parsed but failed validation
    #[error("{0}")]
    Unprocessable(String),

    /// I/O failure while loading, saving or writing files
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Logs `cause` and returns an [`AppError::Internal`] with the generic
    /// message, so paths and OS errors stay out of response bodies.
    pub fn internal(context: &str, cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "{}", context);
        AppError::Internal(INTERNAL_SERVER_ERROR.to_string())
    }

    /// HTTP status code for this error kind.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message.
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::MethodNotAllowed(msg)
            | AppError::UnsupportedMediaType(msg)
            | AppError::Unprocessable(msg)
            | AppError::Internal(msg) => msg,
        }
    }

    /// Pairs the error with the caller's negotiated response format.
    pub fn negotiated(self, format: ResponseFormat) -> NegotiatedError {
        NegotiatedError {
            format,
            error: self,
        }
    }
}

// == IntoResponse Implementation ==
/// Plain-text body, the default for callers that did not ask for JSON.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, self.message().to_string()).into_response()
    }
}

// == Response Format ==
/// Representation chosen from the request's `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Html,
}

// == Negotiated Error ==
/// An [`AppError`] rendered as a JSON envelope or as plain text,
/// depending on what the caller accepts.
#[derive(Debug)]
pub struct NegotiatedError {
    pub format: ResponseFormat,
    pub error: AppError,
}

impl IntoResponse for NegotiatedError {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => {
                let status = self.error.status();
                if status.is_server_error() {
                    error!(error = %self.error, "request failed");
                }
                let body = Envelope::without_data(status, self.error.message());
                (status, Json(body)).into_response()
            }
            ResponseFormat::Html => self.error.into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the CRM server.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result for handlers whose errors follow the caller's `Accept` header.
pub type Negotiated<T> = std::result::Result<T, NegotiatedError>;
