//! Configuration for the one-time code services

use chrono::Duration;
use tafea_shared::config::OtpConfig;

use crate::domain::entities::pending_otp::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for issuing and verifying one-time codes
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of seconds before an issued code expires
    pub code_ttl_seconds: i64,
    /// Delete the pending code when the mail could not be dispatched
    pub rollback_on_dispatch_failure: bool,
    /// Subject line of the mail carrying the code
    pub mail_subject: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_EXPIRATION_MINUTES * 60,
            rollback_on_dispatch_failure: false,
            mail_subject: "Your TAFEA OTP Code".to_string(),
        }
    }
}

impl OtpServiceConfig {
    /// Lifetime of an issued code
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.code_ttl_seconds)
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_ttl_seconds: config.ttl_seconds,
            rollback_on_dispatch_failure: config.rollback_on_dispatch_failure,
            ..Default::default()
        }
    }
}
