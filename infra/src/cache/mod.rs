//! Cache module for Redis-based storage
//!
//! Provides the Redis client and the Redis-backed pending-code store used
//! when several server replicas must share one-time code state.

pub mod redis_client;
pub mod redis_otp_store;


pub use redis_client::RedisClient;
pub use redis_otp_store::RedisOtpStore;
