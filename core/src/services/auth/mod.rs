//! Authentication service module
//!
//! Composes the one-time code services with the token service into the two
//! operations callers use: request a code, then exchange it for a credential.

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
