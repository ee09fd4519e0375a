//! One-time code configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Where pending one-time codes are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpStoreBackend {
    /// In-process map, lost on restart
    #[default]
    Memory,
    /// Redis, shared between replicas
    Redis,
}

impl std::str::FromStr for OtpStoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(OtpStoreBackend::Memory),
            "redis" => Ok(OtpStoreBackend::Redis),
            _ => Err(format!("Invalid OTP store backend: {}", s)),
        }
    }
}

/// One-time code configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Lifetime of an issued code in seconds
    pub ttl_seconds: i64,

    /// Delete the pending code when the mail could not be dispatched
    #[serde(default)]
    pub rollback_on_dispatch_failure: bool,

    /// Store backend
    #[serde(default)]
    pub store_backend: OtpStoreBackend,

    /// Redis connection URL (redis backend only)
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Key prefix for pending codes in Redis
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 300, // 5 minutes
            rollback_on_dispatch_failure: false,
            store_backend: OtpStoreBackend::Memory,
            redis_url: default_redis_url(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl OtpConfig {
    /// Load from the `OTP_*` variables and `REDIS_URL`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_seconds: env_or("OTP_TTL_SECONDS", defaults.ttl_seconds),
            rollback_on_dispatch_failure: env_or(
                "OTP_ROLLBACK_ON_DISPATCH_FAILURE",
                defaults.rollback_on_dispatch_failure,
            ),
            store_backend: env_or("OTP_STORE_BACKEND", defaults.store_backend),
            redis_url: std::env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: std::env::var("OTP_KEY_PREFIX").unwrap_or(defaults.key_prefix),
        }
    }
}

fn default_redis_url() -> String {
    String::from("redis://localhost:6379")
}

fn default_key_prefix() -> String {
    String::from("otp:pending")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.ttl_seconds, 300);
        assert!(!config.rollback_on_dispatch_failure);
        assert_eq!(config.store_backend, OtpStoreBackend::Memory);
        assert_eq!(config.key_prefix, "otp:pending");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("Redis".parse::<OtpStoreBackend>().unwrap(), OtpStoreBackend::Redis);
        assert_eq!("in-memory".parse::<OtpStoreBackend>().unwrap(), OtpStoreBackend::Memory);
        assert!("mongo".parse::<OtpStoreBackend>().is_err());
    }
}
