use super::config::AuthConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Token claims. Expiry is the only claim: the token proves that the bearer
/// once presented the API key, nothing about who they are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub exp: i64,
}

/// Stateless signed-token authentication.
///
/// Exchanges the pre-shared API key for an HS256 token and verifies tokens by
/// signature and expiry alone. Nothing is stored server-side.
#[derive(Clone)]
pub struct TokenAuth {
    inner: Arc<TokenAuthInner>,
}

struct TokenAuthInner {
    api_key: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenAuth {
    pub fn new(config: &AuthConfig) -> eyre::Result<Self> {
        let ttl = Duration::from_std(config.token_ttl)
            .map_err(|e| eyre::eyre!("Token lifetime out of range: {}", e))?;

        tracing::info!(ttl_seconds = ttl.num_seconds(), "Token auth initialized");
        Ok(Self {
            inner: Arc::new(TokenAuthInner {
                api_key: config.api_key.clone(),
                encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
                decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
                ttl,
            }),
        })
    }

    /// Exact comparison against the configured API key.
    pub fn api_key_matches(&self, candidate: &str) -> bool {
        candidate == self.inner.api_key
    }

    /// Token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.inner.ttl.num_seconds()
    }

    /// Sign a fresh token that expires after the configured lifetime.
    pub fn issue_token(&self) -> eyre::Result<String> {
        let claims = TokenClaims {
            exp: (Utc::now() + self.inner.ttl).timestamp(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(&header, &claims, &self.inner.encoding_key)?;
        Ok(token)
    }

    /// Verify signature and expiry, returning the decoded claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<TokenClaims> {
        let token_data = decode::<TokenClaims>(
            token,
            &self.inner.decoding_key,
            &Validation::new(jsonwebtoken::Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}
