//! Token service error types.
//!
//! Every error is converted at the request boundary into the flat
//! `{"error": "<message>"}` body that mobile clients already parse. Signing
//! failures are logged server-side and answered with a generic message so
//! that no credential detail reaches the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned when either request field is missing or empty.
pub const VALIDATION_MESSAGE: &str = "Room name and participant name are required";

/// Message returned for every signing failure.
pub const SIGNING_FAILED_MESSAGE: &str = "Failed to generate token";

/// Message returned for unsupported verbs on the token route.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// Message returned when the request body cannot be parsed.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request body";

#[derive(Debug, Error)]
pub enum TokenError {
    /// Caller supplied incomplete input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The grant could not be signed. The detail is server-side only.
    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Malformed JSON or unsupported content type.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TokenError {
    /// Returns the HTTP status code for this error (for metrics recording).
    pub fn status_code(&self) -> u16 {
        match self {
            TokenError::Validation(_) | TokenError::InvalidRequest(_) => 400,
            TokenError::MethodNotAllowed => 405,
            TokenError::Signing(_) => 500,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            TokenError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            TokenError::Signing(detail) => {
                tracing::error!(target: "token.crypto", error = %detail, "Error generating token");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SIGNING_FAILED_MESSAGE.to_string(),
                )
            }
            TokenError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            ),
            TokenError::InvalidRequest(detail) => {
                tracing::debug!(target: "token.request", error = %detail, "Rejected request body");
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE.to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
