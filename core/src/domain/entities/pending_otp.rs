//! Pending one-time code entity for email-based authentication.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Smallest code that can be issued
pub const OTP_CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const OTP_CODE_MAX: u32 = 999_999;

/// Default expiration time for one-time codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// A one-time code waiting to be verified
///
/// At most one exists per identifier; issuing again replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOtp {
    /// Email address the code was sent to
    pub identifier: String,

    /// The 6-digit code
    pub code: u32,

    /// Instant from which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

/// Lifecycle state of the pending code for an identifier
///
/// Derived from the store contents and the current time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpState {
    /// No code has been issued, or it was consumed
    Absent,
    /// A code exists and can still be verified
    PendingValid,
    /// A code exists but its lifetime has elapsed
    PendingExpired,
}

impl OtpState {
    /// Classify an optional store entry at `now`
    pub fn of(entry: Option<&PendingOtp>, now: DateTime<Utc>) -> Self {
        match entry {
            None => OtpState::Absent,
            Some(pending) if pending.is_expired_at(now) => OtpState::PendingExpired,
            Some(_) => OtpState::PendingValid,
        }
    }
}

impl PendingOtp {
    /// Creates a pending code that expires `ttl` from now
    pub fn new(identifier: impl Into<String>, code: u32, ttl: Duration) -> Self {
        Self::with_expiry(identifier, code, Utc::now() + ttl)
    }

    /// Creates a pending code with an absolute expiry
    pub fn with_expiry(identifier: impl Into<String>, code: u32, expires_at: DateTime<Utc>) -> Self {
        Self {
            identifier: identifier.into(),
            code,
            expires_at,
        }
    }

    /// Generates a uniformly random code in `[OTP_CODE_MIN, OTP_CODE_MAX]`
    ///
    /// Uses OsRng (OS-provided CSPRNG); codes must not be predictable.
    pub fn generate_code() -> u32 {
        OsRng.gen_range(OTP_CODE_MIN..=OTP_CODE_MAX)
    }

    /// Checks whether the code has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks whether the code has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Compares a submitted code in constant time
    pub fn matches(&self, submitted: u32) -> bool {
        constant_time_eq(&self.code.to_be_bytes(), &submitted.to_be_bytes())
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pending_otp() {
        let pending = PendingOtp::new("a@x.com", 123456, Duration::minutes(DEFAULT_EXPIRATION_MINUTES));

        assert_eq!(pending.identifier, "a@x.com");
        assert_eq!(pending.code, 123456);
        assert!(!pending.is_expired());
        assert!(pending.time_until_expiration() > Duration::minutes(4));
    }

    #[test]
    fn test_generate_code_range() {
        for _ in 0..1000 {
            let code = PendingOtp::generate_code();
            assert!((OTP_CODE_MIN..=OTP_CODE_MAX).contains(&code));
            assert_eq!(code.to_string().len(), 6);
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: std::collections::HashSet<u32> =
            (0..100).map(|_| PendingOtp::generate_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let pending = PendingOtp::with_expiry("a@x.com", 123456, now);

        assert!(pending.is_expired_at(now));
        assert!(!pending.is_expired_at(now - Duration::milliseconds(1)));
        assert_eq!(pending.time_until_expiration(), Duration::zero());
    }

    #[test]
    fn test_matches() {
        let pending = PendingOtp::new("a@x.com", 654321, Duration::minutes(5));
        assert!(pending.matches(654321));
        assert!(!pending.matches(654320));
        assert!(!pending.matches(0));
    }

    #[test]
    fn test_state_derivation() {
        let now = Utc::now();
        let valid = PendingOtp::with_expiry("a@x.com", 111111, now + Duration::seconds(30));
        let stale = PendingOtp::with_expiry("a@x.com", 111111, now - Duration::seconds(1));

        assert_eq!(OtpState::of(None, now), OtpState::Absent);
        assert_eq!(OtpState::of(Some(&valid), now), OtpState::PendingValid);
        assert_eq!(OtpState::of(Some(&stale), now), OtpState::PendingExpired);
    }
}
