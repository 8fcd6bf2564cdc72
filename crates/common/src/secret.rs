//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports the [`secrecy`] types used for the API secret that signs room
//! grants. `SecretString` implements `Debug` with redaction, so a struct that
//! derives `Debug` and holds one is safe to log via `{:?}` or tracing fields.
//! The value is zeroized on drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct SigningCredentials {
//!     api_key: String,
//!     api_secret: SecretString,
//! }
//!
//! let creds = SigningCredentials {
//!     api_key: "devkey".to_string(),
//!     api_secret: SecretString::from("hunter2"),
//! };
//!
//! // api_secret is redacted
//! println!("{:?}", creds);
//!
//! // Reading the value requires an explicit call
//! let secret: &str = creds.api_secret.expose_secret();
//! ```
//!
//! Only call `expose_secret()` at the point where the bytes are handed to
//! the signing primitive.

pub use secrecy::{ExposeSecret, SecretString};
