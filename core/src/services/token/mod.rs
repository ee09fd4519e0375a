//! Token service module for credential issuance
//!
//! Mints and verifies the signed, time-bound credential handed out after a
//! successful one-time code verification.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
