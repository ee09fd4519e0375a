//! Mail Service Trait Adapter
//!
//! Implements the core `MailServiceTrait` for any infrastructure
//! `MailService`, bridging provider errors into the core's string errors.

use async_trait::async_trait;
use tafea_core::services::otp::MailServiceTrait;

use super::mail_service::MailService;

/// Adapter that implements the core MailServiceTrait
pub struct MailServiceAdapter {
    inner: Box<dyn MailService>,
}

impl MailServiceAdapter {
    /// Wrap an infrastructure mail service
    pub fn new(inner: Box<dyn MailService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl MailServiceTrait for MailServiceAdapter {
    async fn send(&self, destination: &str, subject: &str, body: &str) -> Result<String, String> {
        self.inner
            .send_mail(destination, subject, body)
            .await
            .map_err(|e| e.to_string())
    }
}
