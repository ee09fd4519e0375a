//! HTTP Mail API Service Implementation
//!
//! Sends mail through a JSON-over-HTTPS transactional mail API. The request
//! is a `POST` to the configured URL with a bearer API key:
//!
//! ```json
//! { "from": "...", "to": "...", "subject": "...", "text": "..." }
//! ```
//!
//! A JSON response carrying an `id` (or `message_id`) field supplies the
//! message id; otherwise one is generated.
//!
//! ## Features
//!
//! - Retry with exponential backoff on 429, 5xx and transport errors
//! - No retry on other client errors
//! - Recipient masking in logs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tafea_shared::config::MailConfig;
use tafea_shared::utils::email::{is_valid_email, mask_email};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::mail_service::MailService;
use crate::InfrastructureError;

/// HTTP mail API configuration
#[derive(Debug, Clone)]
pub struct HttpMailConfig {
    /// Endpoint receiving the send request
    pub api_url: String,
    /// Bearer API key
    pub api_key: String,
    /// Sender address
    pub sender: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TryFrom<&MailConfig> for HttpMailConfig {
    type Error = InfrastructureError;

    fn try_from(config: &MailConfig) -> Result<Self, Self::Error> {
        if config.api_url.is_empty() {
            return Err(InfrastructureError::Config("MAIL_API_URL not set".to_string()));
        }
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config("MAIL_API_KEY not set".to_string()));
        }
        if !is_valid_email(&config.sender) {
            return Err(InfrastructureError::Config(
                "SENDER_MAIL must be a valid email address".to_string(),
            ));
        }

        Ok(Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            sender: config.sender.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
        })
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    message_id: Option<String>,
}

/// HTTP mail API service implementation
pub struct HttpMailService {
    client: Client,
    config: HttpMailConfig,
}

impl HttpMailService {
    /// Create a new HTTP mail service
    pub fn new(config: HttpMailConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "HTTP mail service initialized with sender: {}",
            mask_email(&config.sender)
        );

        Ok(Self { client, config })
    }

    /// Send with retry logic
    async fn send_with_retry(&self, request: &SendRequest<'_>) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending mail attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_email(request.to)
            );

            let outcome = self
                .client
                .post(&self.config.api_url)
                .bearer_auth(&self.config.api_key)
                .json(request)
                .send()
                .await;

            let retryable_error = match outcome {
                Ok(response) if response.status().is_success() => {
                    let parsed = response.json::<SendResponse>().await.unwrap_or_default();
                    let message_id = parsed
                        .id
                        .or(parsed.message_id)
                        .unwrap_or_else(|| format!("http_{}", Uuid::new_v4()));
                    info!(
                        "Mail sent successfully to {} with id: {}",
                        mask_email(request.to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Ok(response) => {
                    let status = response.status();
                    if !is_retryable_status(status) {
                        error!("Mail API rejected request with status {}", status);
                        return Err(InfrastructureError::Mail(format!(
                            "Mail API rejected request: {}",
                            status
                        )));
                    }
                    format!("status {}", status)
                }
                Err(e) => {
                    if !(e.is_timeout() || e.is_connect() || e.is_request()) {
                        error!("Mail request failed: {}", e);
                        return Err(InfrastructureError::Http(e));
                    }
                    e.to_string()
                }
            };

            error!(
                "Failed to send mail (attempt {}/{}): {}",
                attempts, self.config.max_retries, retryable_error
            );
            if attempts >= self.config.max_retries {
                return Err(InfrastructureError::Mail(format!(
                    "Failed to send mail after {} attempts: {}",
                    self.config.max_retries, retryable_error
                )));
            }

            warn!("Retrying mail delivery after {:?}", delay);
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

/// Throttling and server-side failures are worth another attempt
pub(crate) fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl MailService for HttpMailService {
    async fn send_mail(&self, to: &str, subject: &str, text: &str) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Mail(format!(
                "Invalid recipient address: {}",
                mask_email(to)
            )));
        }

        info!(
            "Sending mail to {} via HTTP API (body length: {} chars)",
            mask_email(to),
            text.len()
        );

        let request = SendRequest {
            from: &self.config.sender,
            to,
            subject,
            text,
        };
        self.send_with_retry(&request).await
    }

    fn provider_name(&self) -> &str {
        "HTTP"
    }
}
