//! # TAFEA Core
//!
//! Core business logic and domain layer for the TAFEA backend.
//! This crate contains the one-time code lifecycle (store, issuer, verifier),
//! credential issuance, the collaborator traits implemented by the
//! infrastructure layer, and the domain error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, OtpState, PendingOtp, SignedCredential};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use services::{
    AuthService, ConsumeOutcome, InMemoryOtpStore, IssueReceipt, MailServiceTrait, OtpIssuer,
    OtpServiceConfig, OtpStore, OtpVerifier, TokenService, TokenServiceConfig,
};
