use actix_web::HttpResponse;

use crate::dto::auth::SessionResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/session
///
/// Requires `JwtAuth`; echoes the identity the bearer credential carries.
pub async fn session(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        subject: auth.subject,
        expires_at: auth.expires_at,
    })
}
