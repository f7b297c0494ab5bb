//! Integration tests for Mailscout
//!
//! These tests use wiremock to stand in for the sites being scanned and the
//! picture-of-the-day API, and drive the router directly with `oneshot`.

mod common;
mod server_tests;
