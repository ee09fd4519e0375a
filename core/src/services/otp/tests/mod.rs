//! Tests for the one-time code services

mod issuer_tests;
mod store_tests;
