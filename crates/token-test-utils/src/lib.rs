//! # Token Service Test Utilities
//!
//! Shared test utilities for the token service.
//!
//! This crate provides:
//! - Fixed credentials and configuration (reproducible tokens)
//! - Server test harness (`TestTokenServer` for E2E tests)
//! - A spy signer that counts signing attempts
//! - Custom assertions (`GrantAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use token_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestTokenServer::spawn().await?;
//!
//!     let token: String = /* POST {server.url()}/token */;
//!
//!     token
//!         .assert_valid_grant()
//!         .assert_for_room("lobby")
//!         .assert_for_identity("alice")
//!         .assert_full_permissions();
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod server_harness;
pub mod spy_signer;

pub use assertions::*;
pub use fixtures::*;
pub use server_harness::*;
pub use spy_signer::*;
