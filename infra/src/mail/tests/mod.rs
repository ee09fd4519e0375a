//! Tests for mail service module

mod http_mail_tests;
