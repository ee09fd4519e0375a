//! One-time code service module for email-based authentication
//!
//! This module provides the complete code workflow:
//! - Pending code storage with lazy expiry (`OtpStore`)
//! - Code generation, storage and dispatch (`OtpIssuer`)
//! - Single-use verification (`OtpVerifier`)
//! - The notification collaborator contract (`MailServiceTrait`)

mod config;
mod issuer;
mod store;
mod traits;
mod types;
mod verifier;

#[cfg(test)]
pub(crate) mod tests;

pub use config::OtpServiceConfig;
pub use issuer::OtpIssuer;
pub use store::InMemoryOtpStore;
pub use traits::{MailServiceTrait, OtpStore};
pub use types::{ConsumeOutcome, IssueReceipt};
pub use verifier::OtpVerifier;
