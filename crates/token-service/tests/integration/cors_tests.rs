//! Integration tests for cross-origin access.
//!
//! Browser clients on any origin may call the token endpoint.

use reqwest::{header::HeaderMap, Method, StatusCode};
use token_test_utils::TestTokenServer;

fn assert_permissive_cors(headers: &HeaderMap) {
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let methods = headers
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    for method in ["GET", "POST", "OPTIONS"] {
        assert!(
            methods.contains(method),
            "allow-methods '{}' should contain {}",
            methods,
            method
        );
    }
}

/// A preflight for `/token` succeeds with an empty body and permissive headers.
#[tokio::test]
async fn test_preflight_on_token_route() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestTokenServer::spawn().await?;

    // Act
    let response = reqwest::Client::new()
        .request(Method::OPTIONS, format!("{}/token", server.url()))
        .header("origin", "https://app.example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_permissive_cors(headers);

    let allowed_headers = headers
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(allowed_headers.contains("content-type"));

    let body = response.text().await?;
    assert!(body.is_empty(), "Preflight body should be empty");

    Ok(())
}

/// A bare OPTIONS (no preflight headers) is still answered with 200 and
/// the CORS headers.
#[tokio::test]
async fn test_bare_options_is_ok() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .request(Method::OPTIONS, format!("{}/token", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_permissive_cors(response.headers());

    Ok(())
}

/// OPTIONS ignores whatever body it carries, valid or not.
#[tokio::test]
async fn test_options_with_body_is_ok() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;
    let client = reqwest::Client::new();

    for body in [
        r#"{"roomName":"lobby","participantName":"alice"}"#,
        "{roomName",
        "",
    ] {
        let response = client
            .request(Method::OPTIONS, format!("{}/token", server.url()))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?;

        assert_eq!(
            response.status(),
            StatusCode::OK,
            "OPTIONS with body {:?} should be 200",
            body
        );
        assert_permissive_cors(response.headers());
    }

    Ok(())
}

/// Successful and failed token responses both carry the allow-origin header.
#[tokio::test]
async fn test_token_responses_carry_cors_header() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;
    let client = reqwest::Client::new();

    let ok = client
        .post(format!("{}/token", server.url()))
        .header("origin", "https://app.example.com")
        .json(&serde_json::json!({"roomName": "lobby", "participantName": "alice"}))
        .send()
        .await?;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(
        ok.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let rejected = client
        .post(format!("{}/token", server.url()))
        .header("origin", "https://app.example.com")
        .json(&serde_json::json!({}))
        .send()
        .await?;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        rejected
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    Ok(())
}
