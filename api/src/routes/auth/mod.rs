//! Authentication route handlers
//!
//! - Requesting a one-time code by email
//! - Exchanging the code for a signed credential
//! - Inspecting the session a credential carries

pub mod request_otp;
pub mod session;
pub mod verify_otp;

use std::sync::Arc;
use tafea_core::services::{AuthService, MailServiceTrait, OtpStore};

/// Application state that holds shared services
pub struct AppState<S, M>
where
    S: OtpStore,
    M: MailServiceTrait,
{
    pub auth_service: Arc<AuthService<S, M>>,
}

impl<S, M> AppState<S, M>
where
    S: OtpStore,
    M: MailServiceTrait,
{
    pub fn new(auth_service: Arc<AuthService<S, M>>) -> Self {
        Self { auth_service }
    }
}
