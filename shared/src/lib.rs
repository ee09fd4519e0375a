//! Shared utilities and common types for the TAFEA server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The error response body returned by every endpoint
//! - Email address helpers (validation, normalization, log masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, JwtConfig, LoggingConfig, MailConfig, OtpConfig, OtpStoreBackend,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::email;
