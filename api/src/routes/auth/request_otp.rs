use actix_web::{web, HttpResponse};
use tafea_core::services::{MailServiceTrait, OtpStore};
use tafea_shared::{error_codes, ErrorResponse};
use validator::Validate;

use super::AppState;
use crate::dto::auth::{MessageResponse, RequestOtpRequest};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/v1/auth/request-otp
///
/// Issues a fresh code for the address and mails it. A pending code for
/// the same address is replaced.
///
/// # Request Body
///
/// ```json
/// { "email": "a@x.com", "username": "Ann" }
/// ```
///
/// # Responses
///
/// - 200 `{ "message": "OTP sent successfully." }`
/// - 400 missing or malformed fields
/// - 500 the code could not be mailed
pub async fn request_otp<S, M>(
    state: web::Data<AppState<S, M>>,
    request: web::Json<RequestOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    M: MailServiceTrait + 'static,
{
    let request = request.into_inner();
    if !request.has_required_fields() {
        return validation_error("Username and email are required.");
    }

    let request = RequestOtpRequest {
        email: request.email.trim().to_string(),
        username: request.username.trim().to_string(),
    };
    if let Err(validation_errors) = request.validate() {
        let mut fields: Vec<&str> = validation_errors.field_errors().into_keys().collect();
        fields.sort_unstable();
        tracing::warn!(fields = ?fields, event = "otp_request_invalid", "Invalid OTP request");

        return HttpResponse::BadRequest().json(
            ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data.")
                .add_detail("fields", fields),
        );
    }

    match state
        .auth_service
        .request_code(&request.email, &request.username)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new("OTP sent successfully.")),
        Err(e) => handle_domain_error(e),
    }
}
