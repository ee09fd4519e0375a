//! Traits for the pending-code store and mail delivery integration

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::pending_otp::PendingOtp;

use super::types::ConsumeOutcome;

/// Storage for pending one-time codes, keyed by identifier
///
/// Implementations hold at most one entry per identifier. Errors are only
/// expected from external backends; the in-process store never fails.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Insert or overwrite the entry for `identifier`, expiring `ttl` from now
    ///
    /// Returns the absolute expiry that was stored.
    async fn put(&self, identifier: &str, code: u32, ttl: Duration) -> Result<DateTime<Utc>, String>;
    /// Get the current entry, expired or not
    async fn get(&self, identifier: &str) -> Result<Option<PendingOtp>, String>;
    /// Remove the entry; removing a missing entry is not an error
    async fn delete(&self, identifier: &str) -> Result<(), String>;
    /// Atomically compare `code` against the entry and delete it on a match
    ///
    /// Expired entries report `Absent` and may be removed. A mismatch leaves
    /// the entry in place.
    async fn consume(&self, identifier: &str, code: u32) -> Result<ConsumeOutcome, String>;
}

/// Trait for outbound mail integration
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send a message, returning the provider's message id
    async fn send(&self, destination: &str, subject: &str, body: &str) -> Result<String, String>;
}
