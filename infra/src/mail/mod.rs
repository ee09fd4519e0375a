//! Mail Service Module
//!
//! Outbound mail providers used to deliver one-time codes.
//!
//! ## Features
//!
//! - **Mail Service Trait**: Common interface for all providers
//! - **Mock Implementation**: Console output for development
//! - **HTTP Mail API**: Production delivery over HTTPS with retries
//! - **Security**: Recipient masking in logs

pub mod adapter;
pub mod http_mail;
pub mod mail_service;
pub mod mock_mail;

pub use adapter::MailServiceAdapter;
pub use http_mail::{HttpMailConfig, HttpMailService};
pub use mail_service::MailService;
pub use mock_mail::{MockMailService, OutboundMail, OUTBOX_CAPACITY};

use tafea_shared::config::{Environment, MailConfig};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create a mail service based on configuration
///
/// `"http"` selects the HTTP mail API and `"mock"` the console mock. Outside
/// production an unknown provider, or an HTTP provider that cannot be
/// configured, falls back to the mock. In production each of those cases,
/// and `"mock"` itself, is an error.
pub fn create_mail_service(
    config: &MailConfig,
    environment: Environment,
) -> Result<Box<dyn MailService>, InfrastructureError> {
    let production = environment.is_production();
    match config.provider.as_str() {
        "mock" if production => Err(InfrastructureError::Config(
            "The mock mail provider cannot be used in production".to_string(),
        )),
        "mock" => Ok(Box::new(MockMailService::new())),
        "http" => match HttpMailConfig::try_from(config).and_then(HttpMailService::new) {
            Ok(service) => Ok(Box::new(service)),
            Err(e) if production => Err(e),
            Err(e) => {
                tracing::error!("Failed to initialize HTTP mail service: {}", e);
                tracing::warn!("Falling back to mock mail service");
                Ok(Box::new(MockMailService::new()))
            }
        },
        other if production => Err(InfrastructureError::Config(format!(
            "Unknown mail provider '{}'",
            other
        ))),
        other => {
            tracing::warn!("Unknown mail provider '{}', using mock implementation", other);
            Ok(Box::new(MockMailService::new()))
        }
    }
}
