//! One-time code verification

use chrono::Utc;
use std::sync::Arc;
use tafea_shared::utils::email::mask_email;

use crate::domain::entities::pending_otp::OtpState;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};

use super::traits::OtpStore;
use super::types::ConsumeOutcome;

/// Verifies submitted codes against the store, enforcing expiry and single use
pub struct OtpVerifier<S: OtpStore> {
    /// Pending-code store shared with the issuer
    store: Arc<S>,
}

impl<S: OtpStore> OtpVerifier<S> {
    /// Create a new verifier
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Verify `submitted_code` for `identifier`
    ///
    /// A match deletes the pending code, so the same code never verifies
    /// twice. A mismatch keeps it, and the caller may retry until expiry.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The code matched and was consumed
    /// * `Err(AuthError::ExpiredOrAbsent)` - No pending code, or it expired
    /// * `Err(AuthError::CodeMismatch)` - A pending code exists but differs
    pub async fn verify(&self, identifier: &str, submitted_code: &str) -> DomainResult<()> {
        if identifier.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if submitted_code.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "otp".to_string(),
            }
            .into());
        }

        let outcome = match parse_code(submitted_code) {
            Some(code) => self.store.consume(identifier, code).await.map_err(store_error)?,
            // Not a number: it cannot match, but absence and expiry still win
            None => {
                let pending = self.store.get(identifier).await.map_err(store_error)?;
                match OtpState::of(pending.as_ref(), Utc::now()) {
                    OtpState::PendingValid => ConsumeOutcome::Mismatch,
                    OtpState::Absent | OtpState::PendingExpired => ConsumeOutcome::Absent,
                }
            }
        };

        match outcome {
            ConsumeOutcome::Consumed => {
                tracing::info!(
                    email = %mask_email(identifier),
                    event = "otp_verified_success",
                    "One-time code verified and consumed"
                );
                Ok(())
            }
            ConsumeOutcome::Mismatch => {
                tracing::warn!(
                    email = %mask_email(identifier),
                    event = "otp_verification_failed",
                    "One-time code mismatch"
                );
                Err(AuthError::CodeMismatch.into())
            }
            ConsumeOutcome::Absent => {
                tracing::warn!(
                    email = %mask_email(identifier),
                    event = "otp_expired_or_absent",
                    "No valid one-time code pending"
                );
                Err(AuthError::ExpiredOrAbsent.into())
            }
        }
    }
}

/// Coerce a submitted code into the integer domain of issued codes
pub(crate) fn parse_code(submitted: &str) -> Option<u32> {
    let trimmed = submitted.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u32>().ok()
}

fn store_error(e: String) -> DomainError {
    tracing::error!(error = %e, event = "otp_store_error", "One-time code store failure");
    DomainError::Internal {
        message: format!("Failed to read one-time code: {}", e),
    }
}
