//! Token service configuration.
//!
//! Configuration is loaded from environment variables once at startup and
//! never mutated afterwards. The API secret is held in a `SecretString` and
//! redacted in Debug output.

use common::secret::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

/// Placeholder API key used when none is configured in development.
pub const DEV_API_KEY: &str = "devkey";

/// Placeholder API secret used when none is configured in development.
/// Production refuses to start with this value.
pub const DEV_API_SECRET: &str = "secret";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default listen host.
pub const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default grant lifetime (6 hours).
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 6 * 60 * 60;

/// Upper bound on the configurable grant lifetime (24 hours).
pub const MAX_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Default graceful-shutdown drain period.
pub const DEFAULT_SHUTDOWN_DRAIN_SECONDS: u64 = 0;

/// Deployment environment.
///
/// Selects logging verbosity and format, and whether the development
/// credential fallbacks are allowed. Token issuance behaves identically in
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Read `ENVIRONMENT` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        match non_empty(vars, "ENVIRONMENT") {
            None => Ok(Environment::Development),
            Some(value) => value.parse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "token_service=debug,tower_http=debug",
            Environment::Production => "token_service=info,tower_http=info",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidEnvironment(format!(
                "ENVIRONMENT must be 'development' or 'production', got '{}'",
                other
            ))),
        }
    }
}

/// Token service configuration.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:3000).
    pub bind_address: SocketAddr,

    /// Public identifier of the signing key, written to the grant `iss`.
    pub api_key: String,

    /// HMAC key material used to sign grants.
    pub api_secret: SecretString,

    /// Grant lifetime in seconds.
    pub token_ttl_seconds: i64,

    /// Deployment environment.
    pub environment: Environment,

    /// Seconds to wait after a shutdown signal before stopping the server.
    pub shutdown_drain_seconds: u64,
}

/// Custom Debug implementation that redacts the API secret.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("environment", &self.environment)
            .field("shutdown_drain_seconds", &self.shutdown_drain_seconds)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Insecure credentials: {0}")]
    InsecureCredentials(String),

    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid bind host: {0}")]
    InvalidBindHost(String),

    #[error("Invalid token TTL: {0}")]
    InvalidTokenTtl(String),

    #[error("Invalid shutdown drain: {0}")]
    InvalidShutdownDrain(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let environment = Environment::from_vars(vars)?;

        let (api_key, api_secret) = load_credentials(vars, environment)?;

        let port = match non_empty(vars, "PORT") {
            Some(value) => value.parse::<u16>().map_err(|e| {
                ConfigError::InvalidPort(format!(
                    "PORT must be an integer between 0 and 65535, got '{}': {}",
                    value, e
                ))
            })?,
            None => DEFAULT_PORT,
        };

        let bind_host = match non_empty(vars, "BIND_HOST") {
            Some(value) => value.parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidBindHost(format!(
                    "BIND_HOST must be an IPv4 or IPv6 address, got '{}': {}",
                    value, e
                ))
            })?,
            None => DEFAULT_BIND_HOST,
        };
        let bind_address = SocketAddr::new(bind_host, port);

        let token_ttl_seconds = if let Some(value) = non_empty(vars, "TOKEN_TTL_SECONDS") {
            let ttl: i64 = value.parse().map_err(|e| {
                ConfigError::InvalidTokenTtl(format!(
                    "TOKEN_TTL_SECONDS must be a valid integer, got '{}': {}",
                    value, e
                ))
            })?;

            if ttl <= 0 {
                return Err(ConfigError::InvalidTokenTtl(format!(
                    "TOKEN_TTL_SECONDS must be positive, got {}",
                    ttl
                )));
            }

            if ttl > MAX_TOKEN_TTL_SECONDS {
                return Err(ConfigError::InvalidTokenTtl(format!(
                    "TOKEN_TTL_SECONDS must not exceed {} seconds, got {}",
                    MAX_TOKEN_TTL_SECONDS, ttl
                )));
            }

            ttl
        } else {
            DEFAULT_TOKEN_TTL_SECONDS
        };

        let shutdown_drain_seconds = match non_empty(vars, "SHUTDOWN_DRAIN_SECONDS") {
            Some(value) => value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidShutdownDrain(format!(
                    "SHUTDOWN_DRAIN_SECONDS must be a non-negative integer, got '{}': {}",
                    value, e
                ))
            })?,
            None => DEFAULT_SHUTDOWN_DRAIN_SECONDS,
        };

        Ok(Config {
            bind_address,
            api_key,
            api_secret,
            token_ttl_seconds,
            environment,
            shutdown_drain_seconds,
        })
    }

    /// True when either credential is still the development placeholder.
    pub fn uses_development_credentials(&self) -> bool {
        self.api_key == DEV_API_KEY || self.api_secret.expose_secret() == DEV_API_SECRET
    }
}

/// Resolve the signing credentials.
///
/// Development falls back to the placeholders. Production fails closed: both
/// values must be set, and the secret must not be the placeholder.
fn load_credentials(
    vars: &HashMap<String, String>,
    environment: Environment,
) -> Result<(String, SecretString), ConfigError> {
    let api_key = non_empty(vars, "LIVEKIT_API_KEY");
    let api_secret = non_empty(vars, "LIVEKIT_API_SECRET");

    if !environment.is_production() {
        return Ok((
            api_key.unwrap_or(DEV_API_KEY).to_string(),
            SecretString::from(api_secret.unwrap_or(DEV_API_SECRET)),
        ));
    }

    let api_key =
        api_key.ok_or_else(|| ConfigError::MissingEnvVar("LIVEKIT_API_KEY".to_string()))?;
    let api_secret =
        api_secret.ok_or_else(|| ConfigError::MissingEnvVar("LIVEKIT_API_SECRET".to_string()))?;

    if api_secret == DEV_API_SECRET {
        return Err(ConfigError::InsecureCredentials(
            "LIVEKIT_API_SECRET is set to the development placeholder".to_string(),
        ));
    }

    Ok((api_key.to_string(), SecretString::from(api_secret)))
}

/// Look up a variable, treating an empty value as unset.
fn non_empty<'a>(vars: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    vars.get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
