// crates/dpp-core/tests/resolver.rs
// ============================================================================
// Module: Identifier Resolver Tests
// Description: Validate GTIN resolution into documents and redirects.
// Purpose: Ensure format checks run eagerly and targets compose correctly.
// Dependencies: dpp-core, serde_json, url
// ============================================================================

//! Resolver tests: eager format rejection and caller-context outcomes.

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

use dpp_core::CallerContext;
use dpp_core::LotNumber;
use dpp_core::Resolution;
use dpp_core::ViewerBase;
use dpp_core::resolve;
use url::Url;

mod common;

type TestResult = Result<(), String>;

/// Builds the viewer base used across the suite.
fn viewer() -> Result<ViewerBase, String> {
    let base = Url::parse("https://viewer.example").map_err(|err| err.to_string())?;
    Ok(ViewerBase::new(base))
}

#[test]
fn short_gtin_fails_format_validation_in_every_context() -> TestResult {
    let viewer = viewer()?;
    let resolved_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    for caller in [CallerContext::Api, CallerContext::Browser] {
        if resolve("123", None, caller, &viewer, resolved_at).is_ok() {
            return Err(format!("3-digit GTIN must fail format validation for {caller:?}"));
        }
    }
    Ok(())
}

#[test]
fn non_digit_gtin_is_rejected() -> TestResult {
    let viewer = viewer()?;
    let resolved_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    let outcome = resolve("0123456789012X", None, CallerContext::Api, &viewer, resolved_at);
    if outcome.is_ok() {
        return Err("non-digit GTIN must fail format validation".to_string());
    }
    Ok(())
}

#[test]
fn api_context_returns_document_with_gtin_and_batch() -> TestResult {
    let viewer = viewer()?;
    let resolved_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    let lot = LotNumber::new(common::FIXTURE_LOT);
    let resolution =
        resolve(common::FIXTURE_GTIN, Some(&lot), CallerContext::Api, &viewer, resolved_at)
            .map_err(|err| err.to_string())?;
    let Resolution::Document(document) = resolution else {
        return Err("API caller must receive a structured document".to_string());
    };
    if document.gtin.as_str() != common::FIXTURE_GTIN {
        return Err(format!("unexpected gtin: {}", document.gtin));
    }
    if document.batch.as_ref().map(LotNumber::as_str) != Some(common::FIXTURE_LOT) {
        return Err(format!("unexpected batch: {:?}", document.batch));
    }
    let target = document.resolved_target.as_str();
    if !target.contains(common::FIXTURE_GTIN) || !target.contains("batch=LOT-001") {
        return Err(format!("target must embed gtin and batch, got {target}"));
    }
    if document.resolved_target.path() != "/dpp/01234567890123" {
        return Err(format!("unexpected target path: {}", document.resolved_target.path()));
    }
    Ok(())
}

#[test]
fn browser_context_redirects_without_batch_when_none_given() -> TestResult {
    let viewer = viewer()?;
    let resolved_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    let resolution =
        resolve(common::FIXTURE_GTIN, None, CallerContext::Browser, &viewer, resolved_at)
            .map_err(|err| err.to_string())?;
    let Resolution::Redirect { location } = resolution else {
        return Err("browser caller must receive a redirect".to_string());
    };
    if location.path() != "/dpp/01234567890123" {
        return Err(format!("unexpected redirect path: {}", location.path()));
    }
    if location.query().is_some() {
        return Err(format!("redirect must carry no batch parameter, got {location}"));
    }
    Ok(())
}

#[test]
fn both_contexts_compose_the_same_target() -> TestResult {
    let viewer = viewer()?;
    let resolved_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    let lot = LotNumber::new(common::FIXTURE_LOT);
    let api = resolve(common::FIXTURE_GTIN, Some(&lot), CallerContext::Api, &viewer, resolved_at)
        .map_err(|err| err.to_string())?;
    let browser =
        resolve(common::FIXTURE_GTIN, Some(&lot), CallerContext::Browser, &viewer, resolved_at)
            .map_err(|err| err.to_string())?;
    let Resolution::Document(document) = api else {
        return Err("API caller must receive a structured document".to_string());
    };
    let Resolution::Redirect { location } = browser else {
        return Err("browser caller must receive a redirect".to_string());
    };
    if document.resolved_target != location {
        return Err(format!("targets diverged: {} vs {location}", document.resolved_target));
    }
    Ok(())
}

#[test]
fn fourteen_digit_gtin_is_accepted() -> TestResult {
    let viewer = viewer()?;
    let resolved_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    let outcome = resolve("01234567890123", None, CallerContext::Api, &viewer, resolved_at);
    if outcome.is_err() {
        return Err("14-digit GTIN must pass format validation".to_string());
    }
    Ok(())
}

#[test]
fn document_serializes_target_and_timestamp_as_strings() -> TestResult {
    let viewer = viewer()?;
    let resolved_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    let lot = LotNumber::new(common::FIXTURE_LOT);
    let resolution =
        resolve(common::FIXTURE_GTIN, Some(&lot), CallerContext::Api, &viewer, resolved_at)
            .map_err(|err| err.to_string())?;
    let Resolution::Document(document) = resolution else {
        return Err("API caller must receive a structured document".to_string());
    };
    let value = serde_json::to_value(&document).map_err(|err| err.to_string())?;
    let target = value.get("resolvedTarget").and_then(serde_json::Value::as_str);
    if target != Some("https://viewer.example/dpp/01234567890123?batch=LOT-001") {
        return Err(format!("unexpected resolvedTarget: {target:?}"));
    }
    let stamp = value.get("resolvedAt").and_then(serde_json::Value::as_str);
    if stamp != Some("2026-01-15T00:00:00Z") {
        return Err(format!("resolvedAt must render as RFC 3339, got {stamp:?}"));
    }
    Ok(())
}

#[test]
fn batch_values_are_query_encoded() -> TestResult {
    let viewer = viewer()?;
    let resolved_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    let lot = LotNumber::new("LOT 2025/01");
    let resolution =
        resolve(common::FIXTURE_GTIN, Some(&lot), CallerContext::Browser, &viewer, resolved_at)
            .map_err(|err| err.to_string())?;
    let Resolution::Redirect { location } = resolution else {
        return Err("browser caller must receive a redirect".to_string());
    };
    let batch = location
        .query_pairs()
        .find(|(key, _)| key == "batch")
        .map(|(_, value)| value.into_owned());
    if batch.as_deref() != Some("LOT 2025/01") {
        return Err(format!("batch round-trip failed: {batch:?}"));
    }
    Ok(())
}
