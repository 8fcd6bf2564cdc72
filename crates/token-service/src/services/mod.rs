//! Business logic for the token service.

pub mod token_service;
