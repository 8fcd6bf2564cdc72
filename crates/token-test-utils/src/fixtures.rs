//! Fixed credentials and configuration for tests.

use std::collections::HashMap;
use token_service::config::Config;

/// API key written to the `iss` claim of test grants.
pub const TEST_API_KEY: &str = "APItest0123456789";

/// Signing secret used by every test server unless overridden.
pub const TEST_API_SECRET: &str = "test-secret-0123456789abcdef0123456789abcdef";

/// Short grant lifetime so expiry assertions are easy to reason about.
pub const TEST_TOKEN_TTL_SECONDS: i64 = 600;

pub const TEST_ROOM: &str = "test-room";
pub const TEST_PARTICIPANT: &str = "test-participant";

/// Environment variables for a test server bound to an ephemeral port.
pub fn test_vars() -> HashMap<String, String> {
    HashMap::from([
        ("LIVEKIT_API_KEY".to_string(), TEST_API_KEY.to_string()),
        ("LIVEKIT_API_SECRET".to_string(), TEST_API_SECRET.to_string()),
        ("BIND_HOST".to_string(), "127.0.0.1".to_string()),
        ("PORT".to_string(), "0".to_string()),
        (
            "TOKEN_TTL_SECONDS".to_string(),
            TEST_TOKEN_TTL_SECONDS.to_string(),
        ),
    ])
}

/// Configuration built from [`test_vars`].
pub fn test_config() -> Config {
    Config::from_vars(&test_vars()).expect("test configuration must be valid")
}

/// Configuration whose credentials cannot sign anything.
///
/// Built directly rather than through `from_vars`, which would substitute
/// the development fallback for an empty secret.
pub fn unsignable_config() -> Config {
    let mut config = test_config();
    config.api_secret = common::secret::SecretString::from("");
    config
}
