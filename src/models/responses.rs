//! Response DTOs for the CRM API
//!
//! Defines the structure of outgoing HTTP response bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Uniform `{status, message, data}` body used by the demo endpoints and by
/// JSON error responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    /// HTTP status code, mirrored in the response line
    pub status: u16,
    /// Human readable message
    pub message: String,
    /// Optional payload, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// Creates a 200 envelope carrying `data`.
    pub fn ok(message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data.into()),
        }
    }

    /// Creates an envelope with no payload.
    pub fn without_data(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }

    /// HTTP status of this envelope.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// The HTTP status line mirrors the envelope's `status` field.
impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Response body for a customer delete in JSON mode.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            message: "Customer deleted".to_string(),
            id: id.into(),
        }
    }
}
