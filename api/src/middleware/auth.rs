//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer credential from the Authorization
//! header, verifies it with the `TokenService` registered as app data, and
//! injects the resulting `AuthContext` into the request.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use chrono::{DateTime, TimeZone, Utc};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use tafea_core::{
    domain::entities::token::Claims,
    errors::{DomainError, TokenError},
    services::token::TokenService,
};
use tafea_shared::{error_codes, ErrorResponse};

use crate::handlers::error::handle_domain_error;

/// Authenticated identity injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Verified email address the credential was minted for
    pub subject: String,
    /// When the credential stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(DomainError::Token(TokenError::InvalidTokenFormat))?;
        Ok(Self {
            subject: claims.sub,
            expires_at,
        })
    }
}

/// JWT authentication middleware factory
///
/// Needs `web::Data<TokenService>` in the app data; requests are rejected
/// with a 500 when it is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    let response = unauthorized_response("Missing or invalid Authorization header");
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let token_service = match req.app_data::<web::Data<TokenService>>() {
                Some(token_service) => token_service.clone(),
                None => {
                    tracing::error!("JwtAuth used without a TokenService in app data");
                    let response = handle_domain_error(DomainError::Internal {
                        message: "token service not configured".to_string(),
                    });
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let auth_context = match token_service
                .verify(&token)
                .and_then(AuthContext::from_claims)
            {
                Ok(context) => context,
                Err(e) => {
                    tracing::warn!(error = %e, event = "credential_rejected", "Rejected bearer credential");
                    return Ok(req.into_response(handle_domain_error(e)).map_into_right_body());
                }
            };

            req.extensions_mut().insert(auth_context);

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

fn unauthorized_response(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(error_codes::UNAUTHORIZED, message))
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                Error::from(InternalError::from_response(
                    "Authentication required",
                    unauthorized_response("Authentication required"),
                ))
            });

        ready(result)
    }
}
