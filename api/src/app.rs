//! Application factory
//!
//! Builds the actix-web `App` around a shared `AuthService`. The binary and
//! the integration tests construct the app through the same function.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use tafea_core::services::{MailServiceTrait, OtpStore};
use tafea_shared::{error_codes, Environment, ErrorResponse};

use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{
    request_otp::request_otp, session::session, verify_otp::verify_otp, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<S, M>(
    app_state: web::Data<AppState<S, M>>,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: OtpStore + 'static,
    M: MailServiceTrait + 'static,
{
    // JwtAuth verifies against the same service that mints credentials
    let token_service = web::Data::from(app_state.auth_service.token_service().clone());

    App::new()
        .app_data(app_state)
        .app_data(token_service)
        .app_data(json_config())
        .wrap(create_cors(environment))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/request-otp", web::post().to(request_otp::<S, M>))
                    .route("/verify-otp", web::post().to(verify_otp::<S, M>))
                    .route("/session", web::get().to(session).wrap(JwtAuth::new())),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies answer with the standard error body
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(4096)
        .error_handler(|err, _req| {
            tracing::debug!(error = %err, "Rejected request body");
            let response = HttpResponse::BadRequest().json(
                ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body.")
                    .add_detail("reason", err.to_string()),
            );
            InternalError::from_response(err, response).into()
        })
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "tafea-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
