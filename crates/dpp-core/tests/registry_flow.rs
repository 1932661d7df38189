// crates/dpp-core/tests/registry_flow.rs
// ============================================================================
// Module: Registry Flow Tests
// Description: Validate submit/fetch/list orchestration over the store.
// Purpose: Ensure the registry gates, validates, scores, and projects in the
// documented order.
// Dependencies: dpp-core, serde_json
// ============================================================================

//! End-to-end registry tests over the in-memory store.

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

use dpp_core::AccessDenied;
use dpp_core::AllowAll;
use dpp_core::Capability;
use dpp_core::CapabilityCheck;
use dpp_core::FetchError;
use dpp_core::InMemoryPassportStore;
use dpp_core::LotNumber;
use dpp_core::PassportRegistry;
use dpp_core::PassportView;
use dpp_core::SubmitError;

mod common;

type TestResult = Result<(), String>;

/// Capability check that denies everything.
struct DenyAll;

impl CapabilityCheck for DenyAll {
    fn check(&self, capability: Capability) -> Result<(), AccessDenied> {
        Err(AccessDenied { capability })
    }
}

/// Builds a registry with the fixture passport already submitted.
fn seeded_registry() -> Result<PassportRegistry<InMemoryPassportStore>, String> {
    let registry = PassportRegistry::new(InMemoryPassportStore::new());
    let submission = common::fixture_submission()?;
    let submitted_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    registry.submit(submission, submitted_at, &AllowAll).map_err(|err| err.to_string())?;
    Ok(registry)
}

#[test]
fn submit_then_fetch_round_trips_with_fresh_completeness() -> TestResult {
    let registry = seeded_registry()?;
    let lot = LotNumber::new(common::FIXTURE_LOT);
    let view = registry
        .fetch(common::FIXTURE_GTIN, Some(&lot), "admin")
        .map_err(|err| err.to_string())?;
    let PassportView::Full(passport) = view else {
        return Err("admin tier must yield the unrestricted record".to_string());
    };
    let report = passport.completeness.ok_or("fetch must attach a completeness report")?;
    if report.score != 100 || !report.is_compliant {
        return Err(format!("fixture passport must score 100, got {report:?}"));
    }
    Ok(())
}

#[test]
fn fetch_public_tier_projects_the_record() -> TestResult {
    let registry = seeded_registry()?;
    let view = registry.fetch(common::FIXTURE_GTIN, None, "public").map_err(|err| err.to_string())?;
    let PassportView::Public(public) = view else {
        return Err("public tier must yield the projected view".to_string());
    };
    if public.completeness.is_none() {
        return Err("public view must carry the completeness annotation".to_string());
    }
    Ok(())
}

#[test]
fn denied_caller_cannot_submit() -> TestResult {
    let registry = PassportRegistry::new(InMemoryPassportStore::new());
    let submission = common::fixture_submission()?;
    let submitted_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    match registry.submit(submission, submitted_at, &DenyAll) {
        Err(SubmitError::Denied(_)) => Ok(()),
        other => Err(format!("expected denial, got {other:?}")),
    }
}

#[test]
fn duplicate_pair_is_a_conflict() -> TestResult {
    let registry = seeded_registry()?;
    let submission = common::fixture_submission()?;
    let submitted_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    match registry.submit(submission, submitted_at, &AllowAll) {
        Err(SubmitError::Conflict { gtin, lot }) => {
            if gtin.as_str() != common::FIXTURE_GTIN || lot.as_str() != common::FIXTURE_LOT {
                return Err(format!("conflict names the wrong pair: {gtin} {lot}"));
            }
            Ok(())
        }
        other => Err(format!("expected conflict, got {other:?}")),
    }
}

#[test]
fn unknown_gtin_is_not_found_not_malformed() -> TestResult {
    let registry = seeded_registry()?;
    match registry.fetch("9999999999999", None, "public") {
        Err(FetchError::NotFound { gtin, lot }) => {
            if gtin.as_str() != "9999999999999" || lot.is_some() {
                return Err(format!("not-found names the wrong lookup: {gtin} {lot:?}"));
            }
            Ok(())
        }
        other => Err(format!("expected not-found, got {other:?}")),
    }
}

#[test]
fn malformed_gtin_is_rejected_before_lookup() -> TestResult {
    let registry = seeded_registry()?;
    match registry.fetch("123", None, "public") {
        Err(FetchError::MalformedGtin(_)) => Ok(()),
        other => Err(format!("expected malformed-identifier error, got {other:?}")),
    }
}

#[test]
fn invalid_submission_produces_no_record() -> TestResult {
    let registry = PassportRegistry::new(InMemoryPassportStore::new());
    let mut submission = common::fixture_submission()?;
    submission.material_composition.clear();
    let submitted_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    match registry.submit(submission, submitted_at, &AllowAll) {
        Err(SubmitError::Validation(errors)) => {
            if !errors.names_field("materialComposition") {
                return Err(format!("violations did not name materialComposition: {errors:?}"));
            }
        }
        other => return Err(format!("expected validation failure, got {other:?}")),
    }
    let stats = registry.stats().map_err(|err| err.to_string())?;
    if stats.passports != 0 {
        return Err("no record may be stored for an invalid submission".to_string());
    }
    Ok(())
}

#[test]
fn list_annotates_every_passport() -> TestResult {
    let registry = seeded_registry()?;
    let passports = registry.list(20).map_err(|err| err.to_string())?;
    if passports.len() != 1 {
        return Err(format!("expected one stored passport, got {}", passports.len()));
    }
    if passports[0].completeness.is_none() {
        return Err("listing must attach completeness annotations".to_string());
    }
    Ok(())
}

#[test]
fn stats_count_distinct_products_and_operators() -> TestResult {
    let registry = seeded_registry()?;
    let mut second = common::fixture_submission()?;
    second.product.batch = "LOT-002".to_string();
    let submitted_at = common::fixture_timestamp().ok_or("timestamp out of range")?;
    registry.submit(second, submitted_at, &AllowAll).map_err(|err| err.to_string())?;
    let stats = registry.stats().map_err(|err| err.to_string())?;
    if stats.passports != 2 || stats.products != 1 || stats.operators != 1 {
        return Err(format!("unexpected stats: {stats:?}"));
    }
    Ok(())
}
