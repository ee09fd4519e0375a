//! Unit tests for the authentication service

use crate::errors::{AuthError, DomainError, ValidationError};
use crate::services::otp::OtpStore;

use super::mocks::harness;

#[tokio::test]
async fn test_request_then_verify_issues_credential() {
    let h = harness(false);

    let receipt = h.service.request_code("a@x.com", "Ana").await.unwrap();
    assert_eq!(receipt.identifier, "a@x.com");

    let code = h.mail.get_sent_code("a@x.com").unwrap();
    let credential = h.service.verify_code("a@x.com", &code).await.unwrap();
    assert_eq!(credential.subject, "a@x.com");

    let claims = h.service.token_service().verify(&credential.token).unwrap();
    assert_eq!(claims.sub, "a@x.com");
    assert!(h.store.get("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_identifiers_are_normalized() {
    let h = harness(false);

    h.service.request_code("  Ana@Example.COM ", "Ana").await.unwrap();
    assert!(h.store.get("ana@example.com").await.unwrap().is_some());

    let code = h.mail.get_sent_code("ana@example.com").unwrap();
    let credential = h.service.verify_code("ANA@example.com", &code).await.unwrap();
    assert_eq!(credential.subject, "ana@example.com");
}

#[tokio::test]
async fn test_mail_greets_username() {
    let h = harness(false);

    h.service.request_code("a@x.com", " Ana ").await.unwrap();
    let mail = h.mail.last_mail("a@x.com").unwrap();
    assert!(mail.body.starts_with("Hello Ana,"));
}

#[tokio::test]
async fn test_request_requires_email_and_username() {
    let h = harness(false);

    match h.service.request_code("", "Ana").await.unwrap_err() {
        DomainError::ValidationErr(ValidationError::RequiredField { field }) => assert_eq!(field, "email"),
        other => panic!("Expected required field error, got {:?}", other),
    }
    match h.service.request_code("a@x.com", "   ").await.unwrap_err() {
        DomainError::ValidationErr(ValidationError::RequiredField { field }) => assert_eq!(field, "username"),
        other => panic!("Expected required field error, got {:?}", other),
    }
    assert_eq!(h.mail.sent_count(), 0);
}

#[tokio::test]
async fn test_request_rejects_malformed_email() {
    let h = harness(false);

    let result = h.service.request_code("not-an-email", "Ana").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
    assert_eq!(h.mail.sent_count(), 0);
}

#[tokio::test]
async fn test_code_cannot_be_reused() {
    let h = harness(false);

    h.service.request_code("a@x.com", "Ana").await.unwrap();
    let code = h.mail.get_sent_code("a@x.com").unwrap();

    assert!(h.service.verify_code("a@x.com", &code).await.is_ok());
    assert!(matches!(
        h.service.verify_code("a@x.com", &code).await,
        Err(DomainError::Auth(AuthError::ExpiredOrAbsent))
    ));
}

#[tokio::test]
async fn test_only_latest_code_verifies() {
    let h = harness(false);

    h.service.request_code("a@x.com", "Ana").await.unwrap();
    let first = h.mail.get_sent_code("a@x.com").unwrap();
    h.service.request_code("a@x.com", "Ana").await.unwrap();
    let second = h.mail.get_sent_code("a@x.com").unwrap();

    if first != second {
        assert!(matches!(
            h.service.verify_code("a@x.com", &first).await,
            Err(DomainError::Auth(AuthError::CodeMismatch))
        ));
    }
    assert!(h.service.verify_code("a@x.com", &second).await.is_ok());
}

#[tokio::test]
async fn test_wrong_code_mismatch() {
    let h = harness(false);

    h.service.request_code("a@x.com", "Ana").await.unwrap();
    let code: u32 = h.mail.get_sent_code("a@x.com").unwrap().parse().unwrap();
    let wrong = if code == 999_999 { 100_000 } else { code + 1 };

    assert!(matches!(
        h.service.verify_code("a@x.com", &wrong.to_string()).await,
        Err(DomainError::Auth(AuthError::CodeMismatch))
    ));
}

#[tokio::test]
async fn test_dispatch_failure_surfaces() {
    let h = harness(true);

    let result = h.service.request_code("a@x.com", "Ana").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DispatchFailure { .. }))
    ));
}

#[tokio::test]
async fn test_verify_without_request() {
    let h = harness(false);

    assert!(matches!(
        h.service.verify_code("a@x.com", "123456").await,
        Err(DomainError::Auth(AuthError::ExpiredOrAbsent))
    ));
}
