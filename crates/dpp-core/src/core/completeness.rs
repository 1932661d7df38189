// crates/dpp-core/src/core/completeness.rs
// ============================================================================
// Module: DPP Completeness Scorer
// Description: Regulatory completeness scoring over loosely structured records.
// Purpose: Compute a 0-100 score and missing-field labels from a declarative
// checklist of required field paths.
// Dependencies: crate::core::record, serde, serde_json
// ============================================================================

//! ## Overview
//! The scorer walks a declarative checklist of dotted field paths against a
//! JSON-shaped record. A missing intermediate object resolves to absent,
//! never an error, so the scorer is safe on arbitrary partial drafts. The
//! checklist is data, not logic: adding a regulatory requirement is one new
//! table row.
//!
//! Presence follows the source system's truthiness rule: `null`, `false`,
//! `0`, and the empty string all count as missing. A legitimate
//! `recyclabilityScore` of `0` is therefore reported as missing; this is a
//! preserved quirk of the source behavior, flagged in tests rather than
//! corrected, because the regulatory semantics for falsy-but-valid values
//! are unspecified.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::record::DigitalProductPassport;

// ============================================================================
// SECTION: Checklist
// ============================================================================

/// One required-field entry in the regulatory checklist.
///
/// # Invariants
/// - `path` is a dotted path without list indices.
/// - `min_len` applies only when the resolved value is an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Human-readable label reported when the field is missing.
    pub label: &'static str,
    /// Dotted path resolved against the record.
    pub path: &'static str,
    /// Minimum array length for presence (default 1 when declared).
    pub min_len: Option<usize>,
}

/// The fixed, ordered regulatory checklist.
///
/// Order is significant: `missing_fields` labels are reported in this order.
pub const CHECKLIST: [ChecklistItem; 7] = [
    ChecklistItem { label: "Product GTIN", path: "product.gtin", min_len: None },
    ChecklistItem { label: "Batch/Lot Number", path: "product.batch", min_len: None },
    ChecklistItem { label: "Material Composition", path: "materialComposition", min_len: Some(1) },
    ChecklistItem { label: "Supply Chain Journey", path: "journey", min_len: Some(1) },
    ChecklistItem {
        label: "Recyclability Score",
        path: "endOfLife.recyclability.recyclabilityScore",
        min_len: None,
    },
    ChecklistItem {
        label: "Recycling Process",
        path: "endOfLife.recyclability.process",
        min_len: None,
    },
    ChecklistItem {
        label: "Collection Instructions",
        path: "endOfLife.collectionScheme.instructions",
        min_len: None,
    },
];

// ============================================================================
// SECTION: Report
// ============================================================================

/// Result of scoring a record against the checklist.
///
/// # Invariants
/// - `score` is 0-100; `is_compliant` holds iff `score == 100` exactly.
/// - `missing_fields` preserves checklist order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    /// Rounded percentage of satisfied checklist items.
    pub score: u8,
    /// Labels of unsatisfied checklist items, in checklist order.
    pub missing_fields: Vec<String>,
    /// Whether the record satisfies the full checklist.
    pub is_compliant: bool,
}

// ============================================================================
// SECTION: Path Resolution
// ============================================================================

/// Resolves a dotted path against a JSON value.
///
/// Any missing segment, or a segment applied to a non-object, resolves to
/// `None` rather than an error.
#[must_use]
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |node, segment| node.as_object()?.get(segment))
}

/// Source-system truthiness: `null`, `false`, `0`, and `""` are absent.
///
/// Arrays and objects are always truthy here; array emptiness is handled by
/// the checklist's `min_len` rule.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => !matches!(number.as_f64(), Some(float) if float == 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reports whether one checklist item is satisfied by the record.
fn is_satisfied(record: &Value, item: &ChecklistItem) -> bool {
    let Some(resolved) = resolve_path(record, item.path) else {
        return false;
    };
    if let (Some(min_len), Value::Array(entries)) = (item.min_len, resolved) {
        return entries.len() >= min_len;
    }
    is_truthy(resolved)
}

// ============================================================================
// SECTION: Scoring
// ============================================================================

/// Scores a loosely structured record against the regulatory checklist.
///
/// Pure and deterministic; malformed or partial input degrades to "absent"
/// for the affected items and never produces an error.
#[must_use]
pub fn score_value(record: &Value) -> CompletenessReport {
    let mut missing_fields = Vec::new();
    let mut satisfied = 0_usize;

    for item in &CHECKLIST {
        if is_satisfied(record, item) {
            satisfied += 1;
        } else {
            missing_fields.push(item.label.to_string());
        }
    }

    let total = CHECKLIST.len();
    let rounded = (satisfied * 100 + total / 2) / total;
    let score = u8::try_from(rounded).unwrap_or(u8::MAX);

    CompletenessReport { score, missing_fields, is_compliant: score == 100 }
}

/// Scores an assembled passport.
///
/// The passport is viewed through its wire shape so the same checklist
/// drives both typed and untyped callers. Any stale `completeness`
/// annotation on the input is ignored; the score reflects only the current
/// checklist.
#[must_use]
pub fn score_passport(passport: &DigitalProductPassport) -> CompletenessReport {
    match serde_json::to_value(passport) {
        Ok(record) => score_value(&record),
        Err(_) => score_value(&Value::Null),
    }
}
