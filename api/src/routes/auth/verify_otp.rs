use actix_web::{web, HttpResponse};
use tafea_core::services::{MailServiceTrait, OtpStore};

use super::AppState;
use crate::dto::auth::{LoginResponse, VerifyOtpRequest};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/v1/auth/verify-otp
///
/// Exchanges a pending code for a signed credential. The code is consumed
/// on success; a wrong code leaves it pending.
///
/// # Request Body
///
/// ```json
/// { "mail": "a@x.com", "otp": "123456" }
/// ```
///
/// `email` is accepted in place of `mail`, and `otp` may be a number.
///
/// # Responses
///
/// - 200 `{ "message": "Login successful", "token": "...", "expires_at": "..." }`
/// - 400 missing fields, or no unexpired code is pending
/// - 401 the code does not match
pub async fn verify_otp<S, M>(
    state: web::Data<AppState<S, M>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    M: MailServiceTrait + 'static,
{
    let Some((mail, otp)) = request.required_fields() else {
        return validation_error("Mail and OTP are required.");
    };

    match state.auth_service.verify_code(mail, &otp).await {
        Ok(credential) => HttpResponse::Ok().json(LoginResponse {
            message: "Login successful".to_string(),
            token: credential.token,
            expires_at: credential.expires_at,
        }),
        Err(e) => handle_domain_error(e),
    }
}
