// crates/dpp-config/tests/server_validation.rs
// ============================================================================
// Module: Server Config Validation Tests
// Description: Validate bind, auth, and body-limit constraints.
// Purpose: Ensure server settings fail closed before anything listens.
// ============================================================================

//! Server config validation tests for dpp-config.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use dpp_config::ServerAuthConfig;

mod common;

type TestResult = Result<(), String>;

#[test]
fn malformed_bind_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.bind = "localhost".to_string();
    common::assert_invalid(config.validate(), "server.bind must be a host:port socket address")
}

#[test]
fn non_loopback_bind_requires_auth() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.bind = "0.0.0.0:8080".to_string();
    config.server.auth = None;
    common::assert_invalid(config.validate(), "non-loopback bind disallowed without auth tokens")
}

#[test]
fn non_loopback_bind_with_tokens_is_accepted() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.bind = "0.0.0.0:8080".to_string();
    config.server.auth = Some(ServerAuthConfig { bearer_tokens: vec!["token".to_string()] });
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn auth_requires_at_least_one_token() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.auth = Some(ServerAuthConfig { bearer_tokens: Vec::new() });
    common::assert_invalid(config.validate(), "auth.bearer_tokens must be non-empty")
}

#[test]
fn blank_tokens_are_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.auth = Some(ServerAuthConfig { bearer_tokens: vec!["   ".to_string()] });
    common::assert_invalid(config.validate(), "must not contain blank tokens")
}

#[test]
fn tiny_body_limit_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.max_body_bytes = 16;
    common::assert_invalid(config.validate(), "server.max_body_bytes must be at least")
}

#[test]
fn bind_addr_parses_the_validated_string() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    let addr = config.bind_addr().map_err(|err| err.to_string())?;
    if !addr.ip().is_loopback() || addr.port() != 8080 {
        return Err(format!("unexpected bind address: {addr}"));
    }
    Ok(())
}

#[test]
fn ipv6_loopback_is_accepted_without_auth() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.bind = "[::1]:8080".to_string();
    config.validate().map_err(|err| err.to_string())
}
