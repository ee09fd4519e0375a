//! Mock Mail Service Implementation
//!
//! Logs messages instead of sending them. Used for development, and as the
//! fallback outside production when a real provider cannot be configured.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tafea_shared::utils::email::{is_valid_email, mask_email};
use tracing::{info, warn};
use uuid::Uuid;

use super::mail_service::MailService;
use crate::InfrastructureError;

/// Number of messages kept in the outbox; older ones are dropped
pub const OUTBOX_CAPACITY: usize = 100;

/// A message accepted by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Mock mail service for development and testing
///
/// This implementation:
/// - Validates recipient addresses
/// - Generates mock message IDs
/// - Keeps the last `OUTBOX_CAPACITY` messages so tests can read what was sent
#[derive(Clone)]
pub struct MockMailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Most recent messages, oldest first
    outbox: Arc<Mutex<VecDeque<OutboundMail>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to the console
    console_output: bool,
}

impl MockMailService {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(VecDeque::with_capacity(OUTBOX_CAPACITY))),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Copy of the retained messages, oldest first
    pub fn sent(&self) -> Vec<OutboundMail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Last message sent to `to`, if any
    pub fn last_sent_to(&self, to: &str) -> Option<OutboundMail> {
        self.sent().into_iter().rev().find(|mail| mail.to == to)
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send_mail(&self, to: &str, subject: &str, text: &str) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Mail(format!(
                "Invalid recipient address: {}",
                mask_email(to)
            )));
        }

        if self.simulate_failure {
            warn!(
                "Mock mail service simulating failure for recipient: {}",
                mask_email(to)
            );
            return Err(InfrastructureError::Mail(
                "Simulated mail sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Ok(mut outbox) = self.outbox.lock() {
            if outbox.len() == OUTBOX_CAPACITY {
                outbox.pop_front();
            }
            outbox.push_back(OutboundMail {
                to: to.to_string(),
                subject: subject.to_string(),
                text: text.to_string(),
            });
        }

        if self.console_output {
            // Development only: the body carries the code
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", to);
            println!("Subject: {}", subject);
            println!("Message ID: {}", message_id);
            println!("{}", text);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mail_service",
            provider = "mock",
            email = %mask_email(to),
            message_id = %message_id,
            count = count,
            "Mock mail sent"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
