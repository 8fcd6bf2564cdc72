use crate::config::{Config, MAX_TOKEN_TTL_SECONDS};
use crate::errors::TokenError;
use crate::models::AccessGrant;
use chrono::Utc;
use common::grant::GrantClaims;
use common::secret::{ExposeSecret, SecretString};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tracing::instrument;

/// Turns a validated grant into a signed token.
///
/// The HTTP layer only depends on this trait so tests can substitute a
/// signer that records or fails calls.
pub trait GrantSigner: Send + Sync {
    fn sign(&self, grant: &AccessGrant) -> Result<String, TokenError>;
}

/// HS256 signer keyed by the shared API key/secret pair.
#[derive(Debug, Clone)]
pub struct HmacGrantSigner {
    api_key: String,
    api_secret: SecretString,
    ttl_seconds: i64,
}

impl HmacGrantSigner {
    pub fn new(api_key: String, api_secret: SecretString, ttl_seconds: i64) -> Self {
        Self {
            api_key,
            api_secret,
            ttl_seconds,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key.clone(),
            config.api_secret.clone(),
            config.token_ttl_seconds,
        )
    }

    /// Full claim set for `grant` issued at `now` (Unix seconds).
    pub fn claims_for(&self, grant: &AccessGrant, now: i64) -> Result<GrantClaims, TokenError> {
        let exp = now.checked_add(self.ttl_seconds).ok_or_else(|| {
            TokenError::Signing(format!(
                "Token expiry overflows: issued at {} with TTL {}",
                now, self.ttl_seconds
            ))
        })?;

        Ok(GrantClaims {
            iss: self.api_key.clone(),
            sub: grant.identity.clone(),
            name: grant.name.clone(),
            iat: now,
            nbf: now,
            exp,
            jti: grant.identity.clone(),
            video: grant.video.clone(),
        })
    }
}

impl GrantSigner for HmacGrantSigner {
    #[instrument(skip_all)]
    fn sign(&self, grant: &AccessGrant) -> Result<String, TokenError> {
        if self.api_key.is_empty() {
            return Err(TokenError::Signing("API key is not configured".to_string()));
        }

        if self.api_secret.expose_secret().is_empty() {
            return Err(TokenError::Signing(
                "API secret is not configured".to_string(),
            ));
        }

        if self.ttl_seconds <= 0 || self.ttl_seconds > MAX_TOKEN_TTL_SECONDS {
            return Err(TokenError::Signing(format!(
                "Token TTL must be between 1 and {} seconds, got {}",
                MAX_TOKEN_TTL_SECONDS, self.ttl_seconds
            )));
        }

        let claims = self.claims_for(grant, Utc::now().timestamp())?;
        sign_grant_jwt(&claims, self.api_secret.expose_secret().as_bytes())
    }
}

/// Sign grant claims with HMAC-SHA256.
#[instrument(skip_all)]
pub fn sign_grant_jwt(claims: &GrantClaims, secret: &[u8]) -> Result<String, TokenError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());

    encode(&header, claims, &EncodingKey::from_secret(secret))
        .map_err(|e| TokenError::Signing(format!("JWT encoding failed: {}", e)))
}
