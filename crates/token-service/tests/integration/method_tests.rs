//! Integration tests for unsupported verbs on `/token`.

use reqwest::{Method, StatusCode};
use std::sync::Arc;
use token_service::crypto::HmacGrantSigner;
use token_test_utils::{test_config, SpySigner, TestTokenServer};

/// Every verb other than POST (and the CORS-handled OPTIONS) gets a JSON 405
/// and never reaches the signer.
#[tokio::test]
async fn test_other_verbs_are_method_not_allowed() -> Result<(), anyhow::Error> {
    // Arrange
    let config = test_config();
    let spy = Arc::new(SpySigner::delegating(HmacGrantSigner::from_config(&config)));
    let server = TestTokenServer::spawn_with_signer(config, spy.clone()).await?;
    let client = reqwest::Client::new();

    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        // Act
        let response = client
            .request(method.clone(), format!("{}/token", server.url()))
            .json(&serde_json::json!({"roomName": "lobby", "participantName": "alice"}))
            .send()
            .await?;

        // Assert
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "{} /token should be 405",
            method
        );
        let body: serde_json::Value = response.json().await?;
        assert_eq!(body, serde_json::json!({"error": "Method not allowed"}));
    }

    assert_eq!(spy.sign_count(), 0);

    Ok(())
}
