//! Domain entities representing core business objects.

pub mod pending_otp;
pub mod token;

// Re-export commonly used types
pub use pending_otp::{
    OtpState, PendingOtp, DEFAULT_EXPIRATION_MINUTES, OTP_CODE_MAX, OTP_CODE_MIN,
};
pub use token::{Claims, SignedCredential, CREDENTIAL_EXPIRY_MINUTES};
