//! Auth core configuration.
//!
//! The signing secret is explicit construction-time configuration, never
//! ambient global state — each service/codec instance carries its own,
//! which keeps tests isolated with distinct secrets.

use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("jwt secret must be non-empty")]
    EmptySecret,

    #[error("token ttl must be a positive number of seconds")]
    NonPositiveTtl,
}

/// Validated configuration for token issuance and verification.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_secs: i64) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if token_ttl_secs <= 0 {
            return Err(ConfigError::NonPositiveTtl);
        }
        Ok(Self {
            jwt_secret,
            token_ttl: Duration::seconds(token_ttl_secs),
        })
    }

    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}
