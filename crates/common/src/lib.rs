//! Types shared between the room token service and its consumers.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for room access grant claims
pub mod grant;
