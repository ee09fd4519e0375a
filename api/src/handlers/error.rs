//! Domain error to HTTP response mapping

use actix_web::HttpResponse;
use tafea_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use tafea_shared::{error_codes, ErrorResponse};

/// 400 response for a request that failed input validation
pub fn validation_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message))
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// An expired or absent code is a 400 while a wrong code is a 401. Callers
/// may resubmit after a 401 but must request a new code after a 400.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::ValidationErr(validation_error) => {
            tracing::debug!(error = %validation_error, "Request rejected by validation");
            match validation_error {
                ValidationError::RequiredField { field } => HttpResponse::BadRequest().json(
                    ErrorResponse::new(
                        error_codes::VALIDATION_ERROR,
                        format!("The {} field is required.", field),
                    )
                    .add_detail("field", field),
                ),
                ValidationError::InvalidEmail => HttpResponse::BadRequest().json(
                    ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid email address.")
                        .add_detail("field", "email"),
                ),
            }
        }
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::ExpiredOrAbsent => HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::OTP_EXPIRED_OR_INVALID,
                "OTP has expired or is invalid.",
            )),
            AuthError::CodeMismatch => HttpResponse::Unauthorized().json(ErrorResponse::new(
                error_codes::OTP_MISMATCH,
                "Invalid OTP.",
            )),
            AuthError::DispatchFailure { reason } => {
                tracing::error!(error = %reason, "OTP dispatch failed");
                HttpResponse::InternalServerError().json(ErrorResponse::new(
                    error_codes::DISPATCH_FAILURE,
                    "Failed to send OTP. Please try again later.",
                ))
            }
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::TokenExpired => HttpResponse::Unauthorized().json(ErrorResponse::new(
                error_codes::TOKEN_EXPIRED,
                "Token has expired.",
            )),
            TokenError::InvalidTokenFormat | TokenError::InvalidSignature => {
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    error_codes::TOKEN_INVALID,
                    "Invalid token.",
                ))
            }
            TokenError::TokenGenerationFailed | TokenError::SigningKeyMissing => {
                tracing::error!(error = %token_error, "Credential signing failed");
                internal_error()
            }
        },
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error");
            internal_error()
        }
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}
