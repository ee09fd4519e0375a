//! Business services containing domain logic and use cases.

pub mod auth;
pub mod otp;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use otp::{
    ConsumeOutcome, InMemoryOtpStore, IssueReceipt, MailServiceTrait, OtpIssuer, OtpServiceConfig,
    OtpStore, OtpVerifier,
};
pub use token::{TokenService, TokenServiceConfig};
