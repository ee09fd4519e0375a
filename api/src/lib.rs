//! # TAFEA API
//!
//! actix-web transport for one-time code email authentication: routes,
//! request/response DTOs, error-to-HTTP mapping and the JWT middleware.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
