//! Domain-specific error types for one-time code authentication
//!
//! The transport layer decides status codes and response bodies for each
//! variant; these types only carry what went wrong.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// No pending code for the identifier, or its lifetime has elapsed.
    /// Both cases are reported identically.
    #[error("OTP has expired or is invalid")]
    ExpiredOrAbsent,

    /// A pending code exists but the submitted one differs; retryable
    #[error("Invalid OTP")]
    CodeMismatch,

    /// The notification collaborator could not deliver the code
    #[error("Failed to dispatch OTP: {reason}")]
    DispatchFailure { reason: String },
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Signing key missing or unusable")]
    SigningKeyMissing,
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,
}
