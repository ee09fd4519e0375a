//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use actix_web::web;
use std::sync::Arc;

use tafea_api::routes::auth::AppState;
use tafea_core::services::{
    AuthService, InMemoryOtpStore, OtpServiceConfig, TokenService, TokenServiceConfig,
};
use tafea_infra::mail::{MailServiceAdapter, MockMailService, OutboundMail};

pub const TEST_SECRET: &str = "api-test-secret-0123456789";

pub type TestState = AppState<InMemoryOtpStore, MailServiceAdapter>;

/// App state over an in-memory store and a mock mailer whose outbox the
/// test keeps a handle to
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub outbox: MockMailService,
    pub store: Arc<InMemoryOtpStore>,
    pub token_service: Arc<TokenService>,
}

pub fn context() -> TestContext {
    build(false)
}

pub fn failing_mail_context() -> TestContext {
    build(true)
}

fn build(mail_fails: bool) -> TestContext {
    let outbox = MockMailService::with_options(false, mail_fails);
    let mail = Arc::new(MailServiceAdapter::new(Box::new(outbox.clone())));
    let store = Arc::new(InMemoryOtpStore::new());
    let token_service = Arc::new(
        TokenService::new(TokenServiceConfig::new(TEST_SECRET)).expect("valid token config"),
    );
    let auth_service = Arc::new(AuthService::new(
        store.clone(),
        mail,
        token_service.clone(),
        OtpServiceConfig::default(),
    ));

    TestContext {
        state: web::Data::new(AppState::new(auth_service)),
        outbox,
        store,
        token_service,
    }
}

/// The six-digit code carried in a mail body
pub fn code_from(mail: &OutboundMail) -> String {
    mail.text
        .split_whitespace()
        .map(|word| word.trim_end_matches('.'))
        .find(|word| word.len() == 6 && word.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .expect("mail body carries a code")
}
