//! Credential entities for JWT-based sessions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Credential validity window (1 hour)
pub const CREDENTIAL_EXPIRY_MINUTES: i64 = 60;

/// Claims structure for the JWT payload
///
/// Carries the verified subject plus the standard timing claims, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (verified email address)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for `subject` valid between the two instants
    pub fn new(subject: impl Into<String>, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Creates claims for `subject` valid for `validity` from now
    pub fn for_subject(subject: impl Into<String>, validity: Duration) -> Self {
        let now = Utc::now();
        Self::new(subject, now, now + validity)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// A signed, time-bound credential handed to the caller after verification
///
/// `token` is opaque to callers. It is not persisted by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCredential {
    /// Encoded bearer token
    pub token: String,

    /// Verified identifier the credential is bound to
    pub subject: String,

    /// When the credential was minted
    pub issued_at: DateTime<Utc>,

    /// When the credential stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl SignedCredential {
    /// Seconds until the credential expires (0 if already expired)
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}
