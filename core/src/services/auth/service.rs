//! Main authentication service implementation

use std::sync::Arc;
use tafea_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::token::SignedCredential;
use crate::errors::{DomainResult, ValidationError};
use crate::services::otp::{
    IssueReceipt, MailServiceTrait, OtpIssuer, OtpServiceConfig, OtpStore, OtpVerifier,
};
use crate::services::token::TokenService;

/// Authentication service for the complete email code flow
pub struct AuthService<S, M>
where
    S: OtpStore,
    M: MailServiceTrait,
{
    /// Issues and dispatches codes
    issuer: OtpIssuer<S, M>,
    /// Checks submitted codes
    verifier: OtpVerifier<S>,
    /// Mints credentials after a successful verification
    token_service: Arc<TokenService>,
}

impl<S, M> AuthService<S, M>
where
    S: OtpStore,
    M: MailServiceTrait,
{
    /// Create a new authentication service
    ///
    /// The issuer and verifier share `store`, so a code issued through this
    /// service is visible to its verification.
    pub fn new(
        store: Arc<S>,
        mail_service: Arc<M>,
        token_service: Arc<TokenService>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            issuer: OtpIssuer::new(store.clone(), mail_service, config),
            verifier: OtpVerifier::new(store),
            token_service,
        }
    }

    /// Request a one-time code for `email`
    ///
    /// Both the address and the display name are required; the address is
    /// normalized before it keys the store.
    ///
    /// # Returns
    ///
    /// * `Ok(IssueReceipt)` - Code stored and mailed
    /// * `Err(DomainError)` - Validation error or issuance failure
    pub async fn request_code(&self, email: &str, username: &str) -> DomainResult<IssueReceipt> {
        if email.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if username.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "username".to_string(),
            }
            .into());
        }
        if !is_valid_email(email) {
            tracing::warn!(
                email = %mask_email(email),
                event = "otp_request_rejected",
                "Rejected malformed email address"
            );
            return Err(ValidationError::InvalidEmail.into());
        }

        let identifier = normalize_email(email);
        tracing::info!(
            email = %mask_email(&identifier),
            event = "otp_requested",
            "One-time code requested"
        );

        self.issuer.issue(&identifier, Some(username.trim())).await
    }

    /// Exchange a code for a signed credential bound to the address
    ///
    /// # Returns
    ///
    /// * `Ok(SignedCredential)` - The code matched and was consumed
    /// * `Err(DomainError)` - Validation, expired or absent code, mismatch, or signing error
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<SignedCredential> {
        let identifier = normalize_email(email);
        self.verifier.verify(&identifier, code).await?;

        let credential = self.token_service.mint(&identifier)?;
        tracing::info!(
            email = %mask_email(&identifier),
            event = "login_success",
            expires_at = %credential.expires_at,
            "Issued credential"
        );

        Ok(credential)
    }

    /// Token service used to mint credentials
    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }
}
