//! Outbound mail configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Mail delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail provider ("http", "mock")
    pub provider: String,

    /// Sender address used in the `from` field
    pub sender: String,

    /// Endpoint of the HTTP mail API
    #[serde(default)]
    pub api_url: String,

    /// Bearer key for the HTTP mail API
    #[serde(default)]
    pub api_key: String,

    /// Maximum retry attempts for failed requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Timeout for API requests in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            sender: String::from("no-reply@tafea.local"),
            api_url: String::new(),
            api_key: String::new(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl MailConfig {
    /// Load from `MAIL_PROVIDER`, `SENDER_MAIL`, `MAIL_API_URL`, `MAIL_API_KEY`
    /// and the `MAIL_*` retry settings
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("MAIL_PROVIDER").unwrap_or(defaults.provider),
            sender: std::env::var("SENDER_MAIL").unwrap_or(defaults.sender),
            api_url: std::env::var("MAIL_API_URL").unwrap_or_default(),
            api_key: std::env::var("MAIL_API_KEY").unwrap_or_default(),
            max_retries: env_or("MAIL_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("MAIL_RETRY_DELAY_MS", defaults.retry_delay_ms),
            request_timeout_secs: env_or("MAIL_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
        }
    }

    /// Whether the mock provider is selected
    pub fn is_mock(&self) -> bool {
        self.provider == "mock"
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}
