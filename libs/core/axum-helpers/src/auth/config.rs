//! Configuration for the API-key exchange and token signing.
//!
//! Implements `FromEnv` from `core_config`, like the other config structs.

use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use std::time::Duration;

/// Default token lifetime when `JWT_EXPIRES_IN` is unset.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

const MIN_SECRET_LEN: usize = 32;

/// Access gate configuration.
///
/// Loaded from environment variables:
/// - `AUTH_API_KEY` (required, `AUTH_TOKEN` accepted as a fallback) - pre-shared key exchanged for a token
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `JWT_EXPIRES_IN` (optional) - token lifetime: `3600`, `3600s`, `60m` or `1h`
#[derive(Clone)]
pub struct AuthConfig {
    pub api_key: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl AuthConfig {
    /// Create a config directly (tests, embedding).
    ///
    /// # Panics
    /// Panics if the secret is shorter than 32 characters.
    pub fn new(api_key: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        let jwt_secret = jwt_secret.into();
        assert!(
            jwt_secret.len() >= MIN_SECRET_LEN,
            "JWT secret must be at least 32 characters"
        );
        Self {
            api_key: api_key.into(),
            jwt_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

impl FromEnv for AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("AUTH_API_KEY").or_else(|_| env_required("AUTH_TOKEN"))?;
        if api_key.is_empty() {
            return Err(ConfigError::ParseError {
                key: "AUTH_API_KEY".to_string(),
                details: "must not be empty".to_string(),
            });
        }

        let jwt_secret = env_required("JWT_SECRET")?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    jwt_secret.len()
                ),
            });
        }

        let raw_ttl = env_or_default("JWT_EXPIRES_IN", "3600");
        let token_ttl = parse_ttl(&raw_ttl).ok_or_else(|| ConfigError::ParseError {
            key: "JWT_EXPIRES_IN".to_string(),
            details: format!("'{}' is not a duration like 3600, 60m or 1h", raw_ttl),
        })?;

        Ok(Self {
            api_key,
            jwt_secret,
            token_ttl,
        })
    }
}

/// Parse `"3600"`, `"45s"`, `"30m"`, `"1h"` or `"1d"` into a non-zero duration.
fn parse_ttl(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.char_indices().last()? {
        (idx, 's') => (&raw[..idx], 1),
        (idx, 'm') => (&raw[..idx], 60),
        (idx, 'h') => (&raw[..idx], 3600),
        (idx, 'd') => (&raw[..idx], 86_400),
        _ => (raw, 1),
    };

    let value: u64 = digits.parse().ok()?;
    let seconds = value.checked_mul(multiplier)?;
    (seconds > 0).then(|| Duration::from_secs(seconds))
}
