//! Mail Service Interface
//!
//! Defines the trait for outbound mail providers that deliver one-time codes
//! and other transactional messages.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Mail service trait for sending transactional email
///
/// Implementations include:
/// - HTTP mail API (JSON over HTTPS)
/// - Mock implementation for development
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send a plain-text message
    ///
    /// # Arguments
    ///
    /// * `to` - Recipient address
    /// * `subject` - Subject line
    /// * `text` - Plain-text body
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier assigned to the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_mail(&self, to: &str, subject: &str, text: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}
