//! One-time code issuance

use chrono::Duration;
use std::sync::Arc;
use tafea_shared::utils::email::mask_email;

use crate::domain::entities::pending_otp::PendingOtp;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};

use super::config::OtpServiceConfig;
use super::traits::{MailServiceTrait, OtpStore};
use super::types::IssueReceipt;

/// Issues one-time codes: generate, store, then dispatch by mail
pub struct OtpIssuer<S: OtpStore, M: MailServiceTrait> {
    /// Pending-code store
    store: Arc<S>,
    /// Mail service used to deliver codes
    mail_service: Arc<M>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<S: OtpStore, M: MailServiceTrait> OtpIssuer<S, M> {
    /// Create a new issuer
    pub fn new(store: Arc<S>, mail_service: Arc<M>, config: OtpServiceConfig) -> Self {
        Self {
            store,
            mail_service,
            config,
        }
    }

    /// Issue a fresh code for `identifier` and mail it
    ///
    /// Any pending code for the same identifier is overwritten, so only the
    /// newest code verifies. The code is never part of the return value.
    ///
    /// # Arguments
    ///
    /// * `identifier` - Email address to send the code to
    /// * `display_name` - Name used to greet the recipient, if any
    ///
    /// # Returns
    ///
    /// * `Ok(IssueReceipt)` - The code was stored and handed to the mail service
    /// * `Err(DomainError)` - Missing identifier, store failure, or `DispatchFailure`
    pub async fn issue(&self, identifier: &str, display_name: Option<&str>) -> DomainResult<IssueReceipt> {
        if identifier.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }

        let code = PendingOtp::generate_code();
        let ttl = self.config.ttl();

        let expires_at = self
            .store
            .put(identifier, code, ttl)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(identifier),
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store one-time code"
                );
                DomainError::Internal {
                    message: format!("Failed to store one-time code: {}", e),
                }
            })?;

        tracing::info!(
            email = %mask_email(identifier),
            event = "otp_generated",
            expires_at = %expires_at,
            "Generated new one-time code"
        );

        let body = compose_body(display_name, code, ttl);
        let message_id = match self
            .mail_service
            .send(identifier, &self.config.mail_subject, &body)
            .await
        {
            Ok(message_id) => message_id,
            Err(reason) => {
                tracing::error!(
                    email = %mask_email(identifier),
                    error = %reason,
                    event = "otp_dispatch_failed",
                    rollback = self.config.rollback_on_dispatch_failure,
                    "Failed to dispatch one-time code"
                );
                if self.config.rollback_on_dispatch_failure {
                    if let Err(e) = self.store.delete(identifier).await {
                        tracing::warn!(
                            email = %mask_email(identifier),
                            error = %e,
                            "Failed to roll back undelivered one-time code"
                        );
                    }
                }
                return Err(AuthError::DispatchFailure { reason }.into());
            }
        };

        tracing::info!(
            email = %mask_email(identifier),
            event = "otp_dispatched",
            message_id = %message_id,
            "One-time code dispatched"
        );

        Ok(IssueReceipt {
            identifier: identifier.to_string(),
            expires_at,
            message_id,
        })
    }
}

/// Mail body carrying the code and its validity window
pub(crate) fn compose_body(display_name: Option<&str>, code: u32, ttl: Duration) -> String {
    let line = format!(
        "Your OTP code is {}. It is valid for {}.",
        code,
        describe_validity(ttl)
    );
    match display_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Hello {},\n\n{}", name, line),
        None => line,
    }
}

/// Human-readable lifetime ("5 minutes", "1 minute", "30 seconds")
pub(crate) fn describe_validity(ttl: Duration) -> String {
    let seconds = ttl.num_seconds().max(0);
    if seconds > 0 && seconds % 60 == 0 {
        let minutes = seconds / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{} minutes", minutes)
        }
    } else if seconds == 1 {
        "1 second".to_string()
    } else {
        format!("{} seconds", seconds)
    }
}
