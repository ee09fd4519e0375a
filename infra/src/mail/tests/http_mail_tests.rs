//! Tests for the HTTP mail API service

use mockito::{Matcher, Server};
use reqwest::StatusCode;
use serde_json::json;
use tafea_shared::config::MailConfig;

use crate::mail::http_mail::is_retryable_status;
use crate::mail::{HttpMailConfig, HttpMailService, MailService};
use crate::InfrastructureError;

fn config(url: String) -> HttpMailConfig {
    HttpMailConfig {
        api_url: url,
        api_key: "test-key".to_string(),
        sender: "no-reply@tafea.test".to_string(),
        max_retries: 3,
        retry_delay_ms: 1,
        request_timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_send_posts_json_with_bearer_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/send")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::Json(json!({
            "from": "no-reply@tafea.test",
            "to": "a@x.com",
            "subject": "Your TAFEA OTP Code",
            "text": "Your OTP code is 123456. It is valid for 5 minutes."
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "msg-42"}"#)
        .create_async()
        .await;

    let service = HttpMailService::new(config(format!("{}/send", server.url()))).unwrap();
    let id = service
        .send_mail(
            "a@x.com",
            "Your TAFEA OTP Code",
            "Your OTP code is 123456. It is valid for 5 minutes.",
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(id, "msg-42");
}

#[tokio::test]
async fn test_send_generates_id_when_response_has_none() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/send")
        .with_status(202)
        .create_async()
        .await;

    let service = HttpMailService::new(config(format!("{}/send", server.url()))).unwrap();
    let id = service.send_mail("a@x.com", "s", "t").await.unwrap();

    mock.assert_async().await;
    assert!(id.starts_with("http_"));
}

#[tokio::test]
async fn test_server_errors_are_retried_until_exhausted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/send")
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let service = HttpMailService::new(config(format!("{}/send", server.url()))).unwrap();
    let result = service.send_mail("a@x.com", "s", "t").await;

    mock.assert_async().await;
    match result {
        Err(InfrastructureError::Mail(message)) => assert!(message.contains("after 3 attempts")),
        other => panic!("Expected mail error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/send")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let service = HttpMailService::new(config(format!("{}/send", server.url()))).unwrap();
    let result = service.send_mail("a@x.com", "s", "t").await;

    mock.assert_async().await;
    assert!(matches!(result, Err(InfrastructureError::Mail(_))));
}

#[tokio::test]
async fn test_invalid_recipient_never_hits_the_api() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/send")
        .expect(0)
        .create_async()
        .await;

    let service = HttpMailService::new(config(format!("{}/send", server.url()))).unwrap();
    assert!(service.send_mail("nope", "s", "t").await.is_err());

    mock.assert_async().await;
}

#[test]
fn test_retryable_statuses() {
    assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
    assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
    assert!(!is_retryable_status(StatusCode::BAD_REQUEST));
    assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
}

#[test]
fn test_config_requires_url_key_and_sender() {
    let base = MailConfig {
        provider: "http".to_string(),
        api_url: "https://mail.example.com/send".to_string(),
        api_key: "key".to_string(),
        ..MailConfig::default()
    };
    assert!(HttpMailConfig::try_from(&base).is_ok());

    let no_url = MailConfig { api_url: String::new(), ..base.clone() };
    assert!(matches!(HttpMailConfig::try_from(&no_url), Err(InfrastructureError::Config(_))));

    let no_key = MailConfig { api_key: String::new(), ..base.clone() };
    assert!(matches!(HttpMailConfig::try_from(&no_key), Err(InfrastructureError::Config(_))));

    let bad_sender = MailConfig { sender: "nobody".to_string(), ..base };
    assert!(matches!(HttpMailConfig::try_from(&bad_sender), Err(InfrastructureError::Config(_))));
}
