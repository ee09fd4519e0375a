//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the TAFEA backend.
//! It provides concrete implementations of the collaborator traits declared
//! by `tafea_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client and a Redis-backed pending-code store for
//!   deployments with more than one replica
//! - **Mail**: Outbound mail providers (HTTP mail API, mock) plus the adapter
//!   that plugs them into the core mail trait

// Re-export core types for convenience
pub use tafea_core::errors::*;

/// Cache module - Redis client and pending-code store
pub mod cache;

/// Mail service module - Outbound mail providers
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail service error
    #[error("Mail service error: {0}")]
    Mail(String),

}
