// crates/dpp-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// ============================================================================

//! Config load validation tests for dpp-config.

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

use std::io::Write;
use std::path::Path;

use dpp_config::ConfigError;
use dpp_config::DppConfig;
use dpp_config::StoreBackend;
use tempfile::NamedTempFile;

mod common;

type TestResult = Result<(), String>;

fn assert_load_invalid(result: Result<DppConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

#[test]
fn load_without_path_yields_validated_defaults() -> TestResult {
    let config = DppConfig::load(None).map_err(|err| err.to_string())?;
    if config.server.bind != "127.0.0.1:8080" {
        return Err(format!("unexpected default bind: {}", config.server.bind));
    }
    if config.store.backend != StoreBackend::Memory {
        return Err("default store backend must be memory".to_string());
    }
    config.viewer_base().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_load_invalid(DppConfig::load(Some(path)), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_load_invalid(DppConfig::load(Some(path)), "config path component too long")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_load_invalid(DppConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_load_invalid(DppConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_rejects_unknown_fields() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[viewer]\nbase_url = \"https://viewer.example\"\nextra = 1\n")
        .map_err(|err| err.to_string())?;
    assert_load_invalid(DppConfig::load(Some(file.path())), "config parse failed")
}

#[test]
fn load_accepts_a_complete_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(
        b"[viewer]\nbase_url = \"https://viewer.example\"\n\n[server]\nbind = \"127.0.0.1:9090\"\n",
    )
    .map_err(|err| err.to_string())?;
    let config = DppConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.server.bind != "127.0.0.1:9090" {
        return Err(format!("unexpected bind: {}", config.server.bind));
    }
    Ok(())
}

#[test]
fn minimal_config_round_trips() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())
}
