//! Room Token Service Library
//!
//! A stateless HTTP service that mints signed access grants for a real-time
//! media room system. A client posts a room name and participant name and
//! receives an HS256 token that the media server verifies with the shared
//! API secret.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Grant signing
//! - `errors` - Error types and their HTTP mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - HTTP metrics middleware
//! - `models` - Request and response bodies
//! - `observability` - Metrics and log correlation helpers
//! - `routes` - Router and application state
//! - `services` - Validation and grant construction

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
