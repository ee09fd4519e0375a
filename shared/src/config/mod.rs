//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Credential signing (JWT) configuration
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Outbound mail provider used to deliver one-time codes
//! - `otp` - One-time code lifetime and pending-code store backend
//! - `server` - HTTP server binding

pub mod auth;
pub mod environment;
pub mod mail;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::MailConfig;
pub use otp::{OtpConfig, OtpStoreBackend};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Credential signing configuration
    pub jwt: JwtConfig,

    /// Mail delivery configuration
    pub mail: MailConfig,

    /// One-time code configuration
    pub otp: OtpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            jwt: JwtConfig::default(),
            mail: MailConfig::default(),
            otp: OtpConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            jwt: JwtConfig::from_env(),
            mail: MailConfig::from_env(),
            otp: OtpConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check the configuration for settings that must stop the process at startup
    ///
    /// A missing signing secret is always fatal. The development default secret
    /// and the mock mail provider are only accepted outside production.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.trim().is_empty() {
            return Err("JWT_SECRET must be set".to_string());
        }
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be changed from the default in production".to_string());
        }
        if self.jwt.token_expiry <= 0 {
            return Err("JWT_EXPIRY_SECONDS must be positive".to_string());
        }
        if self.environment.is_production() && self.mail.is_mock() {
            return Err("MAIL_PROVIDER=mock is not allowed in production".to_string());
        }
        if self.otp.ttl_seconds <= 0 {
            return Err("OTP_TTL_SECONDS must be positive".to_string());
        }
        if self.otp.store_backend == OtpStoreBackend::Redis && self.otp.redis_url.is_empty() {
            return Err("REDIS_URL must be set when OTP_STORE_BACKEND=redis".to_string());
        }
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default`
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
