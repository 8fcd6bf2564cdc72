//! Token issuance endpoint.
//!
//! `POST /token` accepts `{"roomName", "participantName"}` and answers with a
//! signed room grant. Every other verb on the route is answered with 405.

use crate::errors::TokenError;
use crate::models::{TokenRequest, TokenResponse};
use crate::observability::metrics::{record_error, record_token_issuance};
use crate::observability::{hash_for_correlation, ErrorCategory};
use crate::routes::AppState;
use crate::services::token_service;
use axum::{body::Bytes, extract::State, http::Method, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Handle token request.
///
/// POST /token
///
/// The body is parsed by hand rather than through the `Json` extractor: an
/// empty body is treated as an empty request so it fails validation with
/// the same message as a request missing both fields.
#[instrument(
    name = "token.issue",
    skip_all,
    fields(room_hash, participant_hash, status)
)]
pub async fn handle_issue_token(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TokenResponse>, TokenError> {
    let start = Instant::now();

    let result = parse_request(&body).and_then(|request| {
        record_name_hashes(&request);
        token_service::issue_token(
            state.signer.as_ref(),
            request.room_name.as_deref(),
            request.participant_name.as_deref(),
        )
    });

    let duration = start.elapsed();
    let status = if result.is_ok() { "success" } else { "error" };
    tracing::Span::current().record("status", status);
    record_token_issuance(status, duration);

    match result {
        Ok(token) => {
            tracing::info!(target: "token.issue", "Token generated");
            Ok(Json(TokenResponse { token }))
        }
        Err(e) => {
            let category = ErrorCategory::from(&e);
            record_error("issue_token", category.as_str(), e.status_code());
            Err(e)
        }
    }
}

/// Fallback for every verb on `/token` other than POST.
///
/// OPTIONS never reaches this handler; the CORS layer answers it first.
#[instrument(name = "token.method_not_allowed", skip_all, fields(method = %method))]
pub async fn method_not_allowed(method: Method) -> TokenError {
    let error = TokenError::MethodNotAllowed;
    record_error(
        "issue_token",
        ErrorCategory::from(&error).as_str(),
        error.status_code(),
    );
    error
}

fn parse_request(body: &[u8]) -> Result<TokenRequest, TokenError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TokenRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| TokenError::InvalidRequest(e.to_string()))
}

/// Names are participant data; only their hashes go on the span.
fn record_name_hashes(request: &TokenRequest) {
    let span = tracing::Span::current();
    if let Some(room) = request.room_name.as_deref() {
        span.record("room_hash", hash_for_correlation(room).as_str());
    }
    if let Some(participant) = request.participant_name.as_deref() {
        span.record("participant_hash", hash_for_correlation(participant).as_str());
    }
}
