//! Integration tests for `POST /token`
//!
//! Drives a real server over HTTP and inspects the issued grants.

use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use token_service::crypto::HmacGrantSigner;
use token_test_utils::{
    test_config, unsignable_config, GrantAssertions, SpySigner, TestTokenServer, TEST_API_KEY,
    TEST_PARTICIPANT, TEST_ROOM, TEST_TOKEN_TTL_SECONDS,
};

async fn post_token(
    server: &TestTokenServer,
    body: serde_json::Value,
) -> Result<reqwest::Response, anyhow::Error> {
    let response = reqwest::Client::new()
        .post(format!("{}/token", server.url()))
        .json(&body)
        .send()
        .await?;
    Ok(response)
}

async fn error_message(response: reqwest::Response) -> Result<String, anyhow::Error> {
    let body: serde_json::Value = response.json().await?;
    Ok(body
        .get("error")
        .and_then(|e| e.as_str())
        .unwrap_or_default()
        .to_string())
}

// ============================================================================
// Successful Issuance
// ============================================================================

/// A valid request yields a grant for that room and participant with every
/// permission set.
#[tokio::test]
async fn test_issue_token_for_lobby() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestTokenServer::spawn().await?;

    // Act
    let response = post_token(
        &server,
        json!({"roomName": "lobby", "participantName": "alice"}),
    )
    .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    let token = body
        .get("token")
        .and_then(|t| t.as_str())
        .expect("response should contain a token")
        .to_string();

    token
        .assert_valid_grant()
        .assert_for_room("lobby")
        .assert_for_identity("alice")
        .assert_full_permissions()
        .assert_issued_by(&server.config().api_key)
        .assert_expires_in(TEST_TOKEN_TTL_SECONDS);
    assert_eq!(server.config().api_key, TEST_API_KEY);

    Ok(())
}

/// Names are carried verbatim, including non-ASCII text.
#[tokio::test]
async fn test_issue_token_preserves_unicode_names() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = post_token(
        &server,
        json!({"roomName": "salle-été", "participantName": "Zoë 🎥"}),
    )
    .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    let token = body["token"].as_str().unwrap_or_default().to_string();

    token
        .assert_for_room("salle-été")
        .assert_for_identity("Zoë 🎥");

    Ok(())
}

/// Two issuances for the same input differ at most in their time claims;
/// both verify independently.
#[tokio::test]
async fn test_repeated_issuance_is_independent() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;
    let request = json!({"roomName": TEST_ROOM, "participantName": TEST_PARTICIPANT});

    let first: serde_json::Value = post_token(&server, request.clone()).await?.json().await?;
    let second: serde_json::Value = post_token(&server, request).await?.json().await?;

    for body in [first, second] {
        body["token"]
            .as_str()
            .unwrap_or_default()
            .to_string()
            .assert_valid_grant()
            .assert_for_room(TEST_ROOM)
            .assert_for_identity(TEST_PARTICIPANT);
    }

    Ok(())
}

/// A grant signed by one server does not verify with another secret.
#[tokio::test]
async fn test_token_bound_to_configured_secret() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let body: serde_json::Value = post_token(
        &server,
        json!({"roomName": "lobby", "participantName": "alice"}),
    )
    .await?
    .json()
    .await?;

    body["token"]
        .as_str()
        .unwrap_or_default()
        .to_string()
        .assert_not_signed_with("a-different-secret");

    Ok(())
}

// ============================================================================
// Validation
// ============================================================================

/// Missing participant name is rejected before any signing attempt.
#[tokio::test]
async fn test_missing_participant_rejected_without_signing() -> Result<(), anyhow::Error> {
    // Arrange
    let config = test_config();
    let spy = Arc::new(SpySigner::delegating(HmacGrantSigner::from_config(&config)));
    let server = TestTokenServer::spawn_with_signer(config, spy.clone()).await?;

    // Act
    let response = post_token(&server, json!({"roomName": "lobby"})).await?;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await?,
        "Room name and participant name are required"
    );
    assert_eq!(spy.sign_count(), 0, "No signing attempt may occur");

    Ok(())
}

/// Empty strings count as missing.
#[tokio::test]
async fn test_empty_room_name_rejected_without_signing() -> Result<(), anyhow::Error> {
    let config = test_config();
    let spy = Arc::new(SpySigner::delegating(HmacGrantSigner::from_config(&config)));
    let server = TestTokenServer::spawn_with_signer(config, spy.clone()).await?;

    let response = post_token(
        &server,
        json!({"roomName": "", "participantName": "alice"}),
    )
    .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await?,
        "Room name and participant name are required"
    );
    assert_eq!(spy.sign_count(), 0);

    Ok(())
}

/// A POST with no body behaves like a request with neither field.
#[tokio::test]
async fn test_empty_body_is_validation_error() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .post(format!("{}/token", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await?,
        "Room name and participant name are required"
    );

    Ok(())
}

/// Unparseable JSON is a 400 with a generic message.
#[tokio::test]
async fn test_malformed_json_is_bad_request() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .post(format!("{}/token", server.url()))
        .header("content-type", "application/json")
        .body("{\"roomName\": \"lobby\",")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await?, "Invalid request body");

    Ok(())
}

// ============================================================================
// Signing Failures
// ============================================================================

/// Unusable credentials produce a 500 with the generic message only.
#[tokio::test]
async fn test_signing_failure_is_internal_error() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestTokenServer::spawn_with_config(unsignable_config()).await?;

    // Act
    let response = post_token(
        &server,
        json!({"roomName": "lobby", "participantName": "alice"}),
    )
    .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await?;
    assert_eq!(body, r#"{"error":"Failed to generate token"}"#);

    Ok(())
}

/// A failing signer is consulted exactly once and its detail stays private.
#[tokio::test]
async fn test_failing_signer_detail_not_exposed() -> Result<(), anyhow::Error> {
    let spy = Arc::new(SpySigner::failing());
    let server = TestTokenServer::spawn_with_signer(test_config(), spy.clone()).await?;

    let response = post_token(
        &server,
        json!({"roomName": "lobby", "participantName": "alice"}),
    )
    .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await?;
    assert!(!body.contains("spy signer"));
    assert_eq!(spy.sign_count(), 1);

    Ok(())
}
