//! Main token service implementation

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, SignedCredential};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Service for minting and verifying signed credentials
///
/// Stateless: nothing is persisted, and a credential is valid for any
/// holder of the signing secret until it expires.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or `SigningKeyMissing` when the secret is empty.
    /// Only HMAC algorithms are accepted.
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        if config.jwt_secret.is_empty() {
            return Err(TokenError::SigningKeyMissing.into());
        }
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Internal {
                message: format!("Unsupported JWT algorithm: {:?}", config.algorithm),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Lifetime of minted credentials
    pub fn validity(&self) -> Duration {
        Duration::seconds(self.config.token_expiry_seconds)
    }

    /// Mints a credential bound to `identifier`
    ///
    /// # Returns
    ///
    /// * `Ok(SignedCredential)` - Token plus its subject and timing
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn mint(&self, identifier: &str) -> DomainResult<SignedCredential> {
        let claims = Claims::for_subject(identifier, self.validity());
        let token = self.encode_claims(&claims)?;

        tracing::debug!(event = "credential_minted", exp = claims.exp, "Minted credential");

        Ok(SignedCredential {
            token,
            subject: claims.sub,
            issued_at: from_timestamp(claims.iat)?,
            expires_at: from_timestamp(claims.exp)?,
        })
    }

    /// Verifies a credential and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature and expiry are valid
    /// * `Err(TokenError::TokenExpired)` - Past `exp`, with no leeway
    /// * `Err(TokenError::InvalidSignature)` - Signed with another key
    /// * `Err(TokenError::InvalidTokenFormat)` - Anything else
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                ErrorKind::InvalidSignature => DomainError::Token(TokenError::InvalidSignature),
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            }
        })?;

        // jsonwebtoken accepts exp == now; credentials end at exp
        if token_data.claims.is_expired() {
            return Err(TokenError::TokenExpired.into());
        }

        Ok(token_data.claims)
    }

    /// Encodes claims into a signed JWT
    pub(crate) fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}

fn from_timestamp(seconds: i64) -> DomainResult<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or(DomainError::Token(TokenError::TokenGenerationFailed))
}
