//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions over issued room grants.

use crate::fixtures::TEST_API_SECRET;
use chrono::Utc;
use common::grant::GrantClaims;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

/// Read the claims without checking the signature.
///
/// Signature checks are a separate assertion so a failing claim assertion
/// reports the claim, not a verification error.
fn read_claims(token: &str) -> GrantClaims {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<GrantClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .expect("Failed to parse grant claims")
        .claims
}

/// Custom assertions for issued grants
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_grant()
///     .assert_for_room("lobby")
///     .assert_for_identity("alice")
///     .assert_full_permissions();
/// ```
pub trait GrantAssertions {
    /// Assert the token is an HS256 JWT signed with the fixture secret
    fn assert_valid_grant(&self) -> &Self;

    /// Assert the token verifies with `secret`
    fn assert_signed_with(&self, secret: &str) -> &Self;

    /// Assert the token does NOT verify with `secret`
    fn assert_not_signed_with(&self, secret: &str) -> &Self;

    /// Assert the video grant targets `room`
    fn assert_for_room(&self, room: &str) -> &Self;

    /// Assert identity (`sub`) and display name are both `identity`
    fn assert_for_identity(&self, identity: &str) -> &Self;

    /// Assert join, publish, subscribe and publish-data are all granted
    fn assert_full_permissions(&self) -> &Self;

    /// Assert the `iss` claim is `api_key`
    fn assert_issued_by(&self, api_key: &str) -> &Self;

    /// Assert the token expires `seconds` after issuance and is not yet expired
    fn assert_expires_in(&self, seconds: i64) -> &Self;
}

impl GrantAssertions for String {
    fn assert_valid_grant(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let header = decode_header(self).expect("Failed to parse JWT header");
        assert_eq!(header.alg, Algorithm::HS256, "Expected HS256 algorithm");
        assert_eq!(header.typ.as_deref(), Some("JWT"), "Expected JWT type");

        self.assert_signed_with(TEST_API_SECRET)
    }

    fn assert_signed_with(&self, secret: &str) -> &Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let result = decode::<GrantClaims>(
            self,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        );
        assert!(
            result.is_ok(),
            "Token does not verify with the given secret: {:?}",
            result.err()
        );

        self
    }

    fn assert_not_signed_with(&self, secret: &str) -> &Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let result = decode::<GrantClaims>(
            self,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        );
        assert!(
            result.is_err(),
            "Token unexpectedly verifies with the given secret"
        );

        self
    }

    fn assert_for_room(&self, room: &str) -> &Self {
        let claims = read_claims(self);
        assert_eq!(
            claims.video.room, room,
            "Grant is for room '{}', expected '{}'",
            claims.video.room, room
        );

        self
    }

    fn assert_for_identity(&self, identity: &str) -> &Self {
        let claims = read_claims(self);
        assert_eq!(claims.sub, identity, "Unexpected identity (sub)");
        assert_eq!(claims.name, identity, "Display name should equal identity");

        self
    }

    fn assert_full_permissions(&self) -> &Self {
        let video = read_claims(self).video;
        assert!(video.room_join, "roomJoin should be granted");
        assert!(video.can_publish, "canPublish should be granted");
        assert!(video.can_subscribe, "canSubscribe should be granted");
        assert!(video.can_publish_data, "canPublishData should be granted");

        self
    }

    fn assert_issued_by(&self, api_key: &str) -> &Self {
        let claims = read_claims(self);
        assert_eq!(claims.iss, api_key, "Unexpected issuer (iss)");

        self
    }

    fn assert_expires_in(&self, seconds: i64) -> &Self {
        let claims = read_claims(self);
        assert_eq!(
            claims.exp - claims.iat,
            seconds,
            "Token lifetime is {} seconds, expected {}",
            claims.exp - claims.iat,
            seconds
        );
        assert!(
            claims.exp > Utc::now().timestamp(),
            "Token is already expired"
        );

        self
    }
}
