//! Observability for the token service.
//!
//! # Privacy by Default
//!
//! Handlers are instrumented with `#[instrument(skip_all)]` and only
//! allow-listed fields are recorded:
//! - **SAFE**: enums, status labels, durations
//! - **HASHED**: room and participant names (see [`hash_for_correlation`])
//! - **NEVER**: the API secret and issued tokens

pub mod metrics;

use crate::errors::TokenError;
use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars).
///
/// Not a security boundary. It lets log lines for the same participant be
/// grouped without writing the name itself.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    // 32 bits is enough to correlate
    hex::encode(result.get(..4).unwrap_or_default())
}

/// Error categories for metrics labels (bounded cardinality).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or malformed caller input
    Validation,
    /// Grant could not be signed
    Cryptographic,
    /// Request shape not served by this route (wrong verb)
    Protocol,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Cryptographic => "cryptographic",
            ErrorCategory::Protocol => "protocol",
        }
    }
}

impl From<&TokenError> for ErrorCategory {
    fn from(err: &TokenError) -> Self {
        match err {
            TokenError::Validation(_) | TokenError::InvalidRequest(_) => ErrorCategory::Validation,
            TokenError::Signing(_) => ErrorCategory::Cryptographic,
            TokenError::MethodNotAllowed => ErrorCategory::Protocol,
        }
    }
}
