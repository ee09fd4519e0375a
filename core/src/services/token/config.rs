//! Configuration for the token service

use jsonwebtoken::Algorithm;
use std::str::FromStr;
use tafea_shared::config::JwtConfig;

use crate::domain::entities::token::CREDENTIAL_EXPIRY_MINUTES;
use crate::errors::{DomainError, TokenError};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Credential lifetime in seconds
    pub token_expiry_seconds: i64,
}

impl TokenServiceConfig {
    /// Create a configuration with the default algorithm and lifetime
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_expiry_seconds: CREDENTIAL_EXPIRY_MINUTES * 60,
        }
    }

    /// Set the credential lifetime in seconds
    pub fn with_expiry_seconds(mut self, seconds: i64) -> Self {
        self.token_expiry_seconds = seconds;
        self
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = DomainError;

    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        if config.secret.is_empty() {
            return Err(TokenError::SigningKeyMissing.into());
        }
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| DomainError::Internal {
            message: format!("Unsupported JWT algorithm: {}", config.algorithm),
        })?;

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            token_expiry_seconds: config.token_expiry,
        })
    }
}
