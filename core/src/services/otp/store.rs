//! In-process pending-code store

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::entities::pending_otp::PendingOtp;

use super::traits::OtpStore;
use super::types::ConsumeOutcome;

/// Pending-code store backed by a map owned by the process
///
/// Contents are lost on restart, which is acceptable for codes that live
/// minutes. A single lock guards the map, so `consume` is a critical section:
/// two concurrent verifications of the same code cannot both succeed.
/// Replicated deployments need a shared store instead.
#[derive(Debug, Default)]
pub struct InMemoryOtpStore {
    entries: Mutex<HashMap<String, PendingOtp>>,
}

impl InMemoryOtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, identifier: &str, code: u32, ttl: Duration) -> Result<DateTime<Utc>, String> {
        let pending = PendingOtp::new(identifier, code, ttl);
        let expires_at = pending.expires_at;
        self.entries
            .lock()
            .await
            .insert(identifier.to_string(), pending);
        Ok(expires_at)
    }

    async fn get(&self, identifier: &str) -> Result<Option<PendingOtp>, String> {
        Ok(self.entries.lock().await.get(identifier).cloned())
    }

    async fn delete(&self, identifier: &str) -> Result<(), String> {
        self.entries.lock().await.remove(identifier);
        Ok(())
    }

    async fn consume(&self, identifier: &str, code: u32) -> Result<ConsumeOutcome, String> {
        let mut entries = self.entries.lock().await;

        let outcome = match entries.get(identifier) {
            None => ConsumeOutcome::Absent,
            Some(pending) if pending.is_expired_at(Utc::now()) => ConsumeOutcome::Absent,
            Some(pending) if pending.matches(code) => ConsumeOutcome::Consumed,
            Some(_) => ConsumeOutcome::Mismatch,
        };

        // Consumed entries are single use; stale ones are dropped lazily
        if outcome == ConsumeOutcome::Absent || outcome == ConsumeOutcome::Consumed {
            entries.remove(identifier);
        }

        Ok(outcome)
    }
}
