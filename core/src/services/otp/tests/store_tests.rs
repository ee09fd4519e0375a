//! Unit tests for the in-memory pending-code store

use chrono::Duration;
use std::sync::Arc;

use crate::services::otp::{ConsumeOutcome, InMemoryOtpStore, OtpStore};

#[tokio::test]
async fn test_put_and_get() {
    let store = InMemoryOtpStore::new();
    let expires_at = store.put("a@x.com", 123456, Duration::minutes(5)).await.unwrap();

    let pending = store.get("a@x.com").await.unwrap().unwrap();
    assert_eq!(pending.expires_at, expires_at);
    assert_eq!(pending.identifier, "a@x.com");
    assert_eq!(pending.code, 123456);
    assert!(!pending.is_expired());

    assert!(store.get("b@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_put_overwrites_previous_entry() {
    let store = InMemoryOtpStore::new();
    store.put("a@x.com", 111111, Duration::minutes(5)).await.unwrap();
    store.put("a@x.com", 222222, Duration::minutes(5)).await.unwrap();

    assert_eq!(store.get("a@x.com").await.unwrap().unwrap().code, 222222);
    assert_eq!(store.consume("a@x.com", 111111).await.unwrap(), ConsumeOutcome::Mismatch);
    assert_eq!(store.consume("a@x.com", 222222).await.unwrap(), ConsumeOutcome::Consumed);
}

#[tokio::test]
async fn test_delete_missing_entry_is_ok() {
    let store = InMemoryOtpStore::new();
    assert!(store.delete("nobody@x.com").await.is_ok());

    store.put("a@x.com", 123456, Duration::minutes(5)).await.unwrap();
    store.delete("a@x.com").await.unwrap();
    assert!(store.get("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_consume_is_single_use() {
    let store = InMemoryOtpStore::new();
    store.put("a@x.com", 123456, Duration::minutes(5)).await.unwrap();

    assert_eq!(store.consume("a@x.com", 123456).await.unwrap(), ConsumeOutcome::Consumed);
    assert_eq!(store.consume("a@x.com", 123456).await.unwrap(), ConsumeOutcome::Absent);
    assert!(store.get("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_consume_mismatch_keeps_entry() {
    let store = InMemoryOtpStore::new();
    store.put("a@x.com", 123456, Duration::minutes(5)).await.unwrap();

    assert_eq!(store.consume("a@x.com", 654321).await.unwrap(), ConsumeOutcome::Mismatch);
    assert!(store.get("a@x.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_consume_expired_entry_reports_absent_and_evicts() {
    let store = InMemoryOtpStore::new();
    store.put("a@x.com", 123456, Duration::zero()).await.unwrap();

    // Even the correct code is rejected once the lifetime has elapsed
    assert_eq!(store.consume("a@x.com", 123456).await.unwrap(), ConsumeOutcome::Absent);
    assert!(store.get("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_returns_expired_entry() {
    let store = InMemoryOtpStore::new();
    store.put("a@x.com", 123456, Duration::zero()).await.unwrap();

    let pending = store.get("a@x.com").await.unwrap().unwrap();
    assert!(pending.is_expired());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_consume_succeeds_once() {
    let store = Arc::new(InMemoryOtpStore::new());
    store.put("a@x.com", 123456, Duration::minutes(5)).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.consume("a@x.com", 123456).await.unwrap() })
        })
        .collect();

    let mut consumed = 0;
    for handle in handles {
        if handle.await.unwrap() == ConsumeOutcome::Consumed {
            consumed += 1;
        }
    }
    assert_eq!(consumed, 1);
}
