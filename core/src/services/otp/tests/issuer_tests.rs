//! Unit tests for one-time code issuance

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::pending_otp::{OTP_CODE_MAX, OTP_CODE_MIN};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::services::otp::issuer::{compose_body, describe_validity};
use crate::services::otp::{InMemoryOtpStore, OtpIssuer, OtpServiceConfig, OtpStore};

use super::mocks::{FailingOtpStore, MockMailService};

fn issuer(
    store: Arc<InMemoryOtpStore>,
    mail: Arc<MockMailService>,
    config: OtpServiceConfig,
) -> OtpIssuer<InMemoryOtpStore, MockMailService> {
    OtpIssuer::new(store, mail, config)
}

#[tokio::test]
async fn test_issue_stores_and_dispatches_code() {
    let store = Arc::new(InMemoryOtpStore::new());
    let mail = Arc::new(MockMailService::new(false));
    let service = issuer(store.clone(), mail.clone(), OtpServiceConfig::default());

    let before = Utc::now();
    let receipt = service.issue("a@x.com", None).await.unwrap();

    assert_eq!(receipt.identifier, "a@x.com");
    assert!(receipt.message_id.starts_with("mock-msg-"));
    assert!(receipt.expires_at >= before + Duration::minutes(5));
    assert!(receipt.expires_at <= Utc::now() + Duration::minutes(5));

    let pending = store.get("a@x.com").await.unwrap().unwrap();
    assert!((OTP_CODE_MIN..=OTP_CODE_MAX).contains(&pending.code));

    let mail_sent = mail.last_mail("a@x.com").unwrap();
    assert_eq!(mail_sent.subject, "Your TAFEA OTP Code");
    assert_eq!(
        mail_sent.body,
        format!("Your OTP code is {}. It is valid for 5 minutes.", pending.code)
    );
    assert_eq!(mail.get_sent_code("a@x.com"), Some(pending.code.to_string()));
}

#[tokio::test]
async fn test_receipt_expiry_matches_stored_entry() {
    let store = Arc::new(InMemoryOtpStore::new());
    let mail = Arc::new(MockMailService::new(false));
    let service = issuer(store.clone(), mail, OtpServiceConfig::default());

    let receipt = service.issue("a@x.com", None).await.unwrap();

    let pending = store.get("a@x.com").await.unwrap().unwrap();
    assert_eq!(receipt.expires_at, pending.expires_at);
}

#[tokio::test]
async fn test_issue_greets_display_name() {
    let store = Arc::new(InMemoryOtpStore::new());
    let mail = Arc::new(MockMailService::new(false));
    let service = issuer(store, mail.clone(), OtpServiceConfig::default());

    service.issue("a@x.com", Some("Ana")).await.unwrap();

    let body = mail.last_mail("a@x.com").unwrap().body;
    assert!(body.starts_with("Hello Ana,\n\n"));
    assert!(body.contains("It is valid for 5 minutes."));
}

#[tokio::test]
async fn test_reissue_replaces_pending_code() {
    let store = Arc::new(InMemoryOtpStore::new());
    let mail = Arc::new(MockMailService::new(false));
    let service = issuer(store.clone(), mail.clone(), OtpServiceConfig::default());

    service.issue("a@x.com", None).await.unwrap();
    let first_expiry = store.get("a@x.com").await.unwrap().unwrap().expires_at;
    service.issue("a@x.com", None).await.unwrap();

    let pending = store.get("a@x.com").await.unwrap().unwrap();
    assert_eq!(mail.sent_count(), 2);
    assert_eq!(mail.get_sent_code("a@x.com"), Some(pending.code.to_string()));
    assert!(pending.expires_at >= first_expiry);
}

#[tokio::test]
async fn test_issue_empty_identifier() {
    let store = Arc::new(InMemoryOtpStore::new());
    let mail = Arc::new(MockMailService::new(false));
    let service = issuer(store, mail.clone(), OtpServiceConfig::default());

    let result = service.issue("   ", None).await;

    match result.unwrap_err() {
        DomainError::ValidationErr(ValidationError::RequiredField { field }) => {
            assert_eq!(field, "email");
        }
        other => panic!("Expected required field error, got {:?}", other),
    }
    assert_eq!(mail.sent_count(), 0);
}

#[tokio::test]
async fn test_dispatch_failure_keeps_code_by_default() {
    let store = Arc::new(InMemoryOtpStore::new());
    let mail = Arc::new(MockMailService::new(true));
    let service = issuer(store.clone(), mail, OtpServiceConfig::default());

    let result = service.issue("a@x.com", None).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DispatchFailure { .. }))
    ));
    assert!(store.get("a@x.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_dispatch_failure_rolls_back_when_configured() {
    let store = Arc::new(InMemoryOtpStore::new());
    let mail = Arc::new(MockMailService::new(true));
    let config = OtpServiceConfig {
        rollback_on_dispatch_failure: true,
        ..Default::default()
    };
    let service = issuer(store.clone(), mail, config);

    let result = service.issue("a@x.com", None).await;

    match result.unwrap_err() {
        DomainError::Auth(AuthError::DispatchFailure { reason }) => {
            assert_eq!(reason, "Mail service error");
        }
        other => panic!("Expected dispatch failure, got {:?}", other),
    }
    assert!(store.get("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_failure_is_internal_and_skips_dispatch() {
    let mail = Arc::new(MockMailService::new(false));
    let service = OtpIssuer::new(Arc::new(FailingOtpStore), mail.clone(), OtpServiceConfig::default());

    let result = service.issue("a@x.com", None).await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert_eq!(mail.sent_count(), 0);
}

#[test]
fn test_compose_body() {
    assert_eq!(
        compose_body(None, 123456, Duration::minutes(5)),
        "Your OTP code is 123456. It is valid for 5 minutes."
    );
    assert_eq!(
        compose_body(Some("  "), 123456, Duration::minutes(5)),
        "Your OTP code is 123456. It is valid for 5 minutes."
    );
    assert_eq!(
        compose_body(Some("Ana"), 654321, Duration::seconds(90)),
        "Hello Ana,\n\nYour OTP code is 654321. It is valid for 90 seconds."
    );
}

#[test]
fn test_describe_validity() {
    assert_eq!(describe_validity(Duration::minutes(5)), "5 minutes");
    assert_eq!(describe_validity(Duration::minutes(1)), "1 minute");
    assert_eq!(describe_validity(Duration::seconds(1)), "1 second");
    assert_eq!(describe_validity(Duration::seconds(45)), "45 seconds");
    assert_eq!(describe_validity(Duration::zero()), "0 seconds");
}
