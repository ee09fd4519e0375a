//! Redis-backed pending-code store
//!
//! Shares pending codes across replicas. Each identifier maps to one key,
//! `{prefix}:{identifier}`, holding `"{code}:{expires_at_ms}"` with a `PX`
//! expiry so Redis evicts stale entries on its own. The absolute expiry in
//! the value keeps the verdict exact even when the key outlives its TTL by
//! a few milliseconds.
//!
//! `consume` runs as a Lua script, so compare-and-delete is atomic across
//! every process sharing the Redis instance.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use redis::Script;
use tafea_core::domain::entities::pending_otp::PendingOtp;
use tafea_core::services::otp::{ConsumeOutcome, OtpStore};
use tafea_shared::config::OtpConfig;
use tafea_shared::utils::email::mask_email;
use tracing::{debug, warn};

use super::redis_client::RedisClient;
use crate::InfrastructureError;

// Returns 0 when absent or expired, 1 when consumed, 2 on mismatch
const CONSUME_SCRIPT: &str = r#"
local value = redis.call('GET', KEYS[1])
if not value then
  return 0
end
local sep = string.find(value, ':', 1, true)
if not sep then
  redis.call('DEL', KEYS[1])
  return 0
end
local code = string.sub(value, 1, sep - 1)
local expires_at = tonumber(string.sub(value, sep + 1))
if (not expires_at) or tonumber(ARGV[2]) >= expires_at then
  redis.call('DEL', KEYS[1])
  return 0
end
if code == ARGV[1] then
  redis.call('DEL', KEYS[1])
  return 1
end
return 2
"#;

/// Pending-code store backed by Redis
pub struct RedisOtpStore {
    client: RedisClient,
    key_prefix: String,
    consume_script: Script,
}

impl RedisOtpStore {
    /// Create a store over an existing client
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
            consume_script: Script::new(CONSUME_SCRIPT),
        }
    }

    /// Connect using the code store settings
    pub async fn from_config(config: &OtpConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(&config.redis_url).await?;
        Ok(Self::new(client, config.key_prefix.clone()))
    }

    /// Check that Redis answers
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        self.client.health_check().await
    }

    fn key(&self, identifier: &str) -> String {
        format!("{}:{}", self.key_prefix, identifier)
    }
}

/// Serialize an entry value as `"{code}:{expires_at_ms}"`
pub(crate) fn encode_entry(code: u32, expires_at: DateTime<Utc>) -> String {
    format!("{}:{}", code, expires_at.timestamp_millis())
}

/// Parse an entry value written by `encode_entry`
pub(crate) fn decode_entry(identifier: &str, raw: &str) -> Option<PendingOtp> {
    let (code, expires_at_ms) = raw.split_once(':')?;
    let code = code.parse::<u32>().ok()?;
    let expires_at = Utc
        .timestamp_millis_opt(expires_at_ms.parse::<i64>().ok()?)
        .single()?;
    Some(PendingOtp::with_expiry(identifier, code, expires_at))
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn put(&self, identifier: &str, code: u32, ttl: Duration) -> Result<DateTime<Utc>, String> {
        let key = self.key(identifier);
        let ttl_ms = ttl.num_milliseconds();
        let expires_at = Utc::now() + ttl;

        // Redis rejects non-positive expiries; such an entry is already dead
        if ttl_ms <= 0 {
            return self
                .client
                .delete(&key)
                .await
                .map(|_| expires_at)
                .map_err(|e| e.to_string());
        }

        self.client
            .set_with_expiry_ms(&key, &encode_entry(code, expires_at), ttl_ms as u64)
            .await
            .map_err(|e| e.to_string())?;

        debug!(email = %mask_email(identifier), "Stored pending code in Redis");
        Ok(expires_at)
    }

    async fn get(&self, identifier: &str) -> Result<Option<PendingOtp>, String> {
        let raw = self
            .client
            .get(&self.key(identifier))
            .await
            .map_err(|e| e.to_string())?;

        Ok(raw.and_then(|raw| {
            let decoded = decode_entry(identifier, &raw);
            if decoded.is_none() {
                warn!(email = %mask_email(identifier), "Ignoring malformed pending code entry");
            }
            decoded
        }))
    }

    async fn delete(&self, identifier: &str) -> Result<(), String> {
        self.client
            .delete(&self.key(identifier))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn consume(&self, identifier: &str, code: u32) -> Result<ConsumeOutcome, String> {
        let args = [code.to_string(), Utc::now().timestamp_millis().to_string()];
        let verdict = self
            .client
            .eval_script(&self.consume_script, &self.key(identifier), &args)
            .await
            .map_err(|e| e.to_string())?;

        match verdict {
            0 => Ok(ConsumeOutcome::Absent),
            1 => Ok(ConsumeOutcome::Consumed),
            2 => Ok(ConsumeOutcome::Mismatch),
            other => Err(format!("Unexpected consume verdict from Redis: {}", other)),
        }
    }
}
