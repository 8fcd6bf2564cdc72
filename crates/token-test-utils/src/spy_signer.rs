//! Signer test double.

use std::sync::atomic::{AtomicUsize, Ordering};
use token_service::crypto::{GrantSigner, HmacGrantSigner};
use token_service::errors::TokenError;
use token_service::models::AccessGrant;

/// Counts signing attempts and either delegates to a real signer or fails.
///
/// # Example
/// ```rust,ignore
/// let spy = Arc::new(SpySigner::delegating(HmacGrantSigner::from_config(&config)));
/// let server = TestTokenServer::spawn_with_signer(config, spy.clone()).await?;
/// // ... send an invalid request ...
/// assert_eq!(spy.sign_count(), 0);
/// ```
pub struct SpySigner {
    inner: Option<HmacGrantSigner>,
    calls: AtomicUsize,
}

impl SpySigner {
    /// Spy that signs with `inner`.
    pub fn delegating(inner: HmacGrantSigner) -> Self {
        Self {
            inner: Some(inner),
            calls: AtomicUsize::new(0),
        }
    }

    /// Spy that fails every signing attempt.
    pub fn failing() -> Self {
        Self {
            inner: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `sign` has been called.
    pub fn sign_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GrantSigner for SpySigner {
    fn sign(&self, grant: &AccessGrant) -> Result<String, TokenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.inner {
            Some(signer) => signer.sign(grant),
            None => Err(TokenError::Signing("spy signer configured to fail".to_string())),
        }
    }
}
