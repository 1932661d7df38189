// crates/dpp-core/src/core/validate.rs
// ============================================================================
// Module: DPP Submission Validator
// Description: Structural and semantic validation of passport submissions.
// Purpose: Accept or reject a whole submission, reporting every violation.
// Dependencies: crate::core::{identifiers, record, time}, serde, thiserror, url
// ============================================================================

//! ## Overview
//! Validation is a pure function from a [`PassportSubmission`] to either an
//! assembled [`DigitalProductPassport`] or a [`ValidationErrors`] value
//! listing every violated constraint. Checks never short-circuit: a
//! submission with five problems reports five violations. Partial acceptance
//! is not supported; any single violation rejects the whole submission.
//!
//! Process-type membership is enforced by [`ProcessType`] at the
//! deserialization boundary, so a non-member label never reaches this
//! module. Composition percentages are bounded per entry but deliberately
//! not required to sum to 100 across the list.
//!
//! [`ProcessType`]: crate::core::record::ProcessType

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::core::identifiers::DppId;
use crate::core::identifiers::Gtin;
use crate::core::identifiers::LotNumber;
use crate::core::record::DigitalProductPassport;
use crate::core::record::PASSPORT_VERSION;
use crate::core::record::PassportSubmission;
use crate::core::record::SupplyChainEvent;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// One violated constraint, addressed by its dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Dotted field path, with list indices (e.g. `journey[2].tier`).
    pub field: String,
    /// Human-readable message for the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Structured validation failure listing every violated constraint.
///
/// # Invariants
/// - Always carries at least one violation.
/// - Violation order follows field declaration order, which keeps error
///   output deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("submission failed validation with {} violation(s)", .violations.len())]
pub struct ValidationErrors {
    /// Every violated constraint, in field order.
    pub violations: Vec<Violation>,
}

impl ValidationErrors {
    /// Creates a failure carrying a single violation.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation { field: field.into(), message: message.into() }],
        }
    }

    /// Reports whether a violation names the given field path.
    #[must_use]
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

/// Accumulator for violations during a validation pass.
///
/// Collects everything; the caller decides success or failure once at the
/// end of the pass.
#[derive(Debug, Default)]
struct Collector {
    /// Violations gathered so far, in check order.
    violations: Vec<Violation>,
}

impl Collector {
    /// Records a violation.
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation { field: field.into(), message: message.into() });
    }

    /// Requires a non-empty string field.
    fn require_non_empty(&mut self, field: &str, value: &str) {
        if value.is_empty() {
            self.push(field, "must not be empty");
        }
    }

    /// Requires a numeric field within an inclusive range.
    fn require_range(&mut self, field: &str, value: f64, min: f64, max: f64) {
        if !(min..=max).contains(&value) {
            self.push(field, format!("must be between {min} and {max}"));
        }
    }

    /// Requires a two-character country code.
    fn require_country(&mut self, field: &str, code: &str) {
        if code.chars().count() != 2 {
            self.push(field, "must be a 2-letter country code");
        }
    }

    /// Requires a parseable URL.
    fn require_url(&mut self, field: &str, value: &str) {
        if Url::parse(value).is_err() {
            self.push(field, "must be a valid URL");
        }
    }

    /// Requires a plausible email address shape.
    fn require_email(&mut self, field: &str, value: &str) {
        let well_formed = value.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        });
        if !well_formed {
            self.push(field, "must be a valid email address");
        }
    }

    /// Converts the accumulated violations into a result.
    fn finish(self) -> Result<(), ValidationErrors> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { violations: self.violations })
        }
    }
}

// ============================================================================
// SECTION: Submission Validation
// ============================================================================

impl PassportSubmission {
    /// Validates every constraint of the submission independently.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing every violated constraint; the
    /// submission as a whole is rejected on any single violation.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut collector = Collector::default();

        self.validate_product(&mut collector);
        self.validate_operator(&mut collector);
        self.validate_composition(&mut collector);
        self.validate_journey(&mut collector);
        self.validate_optional_blocks(&mut collector);
        self.validate_end_of_life(&mut collector);

        collector.finish()
    }

    /// Checks the product identity block.
    fn validate_product(&self, collector: &mut Collector) {
        if Gtin::parse(self.product.gtin.clone()).is_err() {
            collector.push("product.gtin", "must be 13 or 14 digits");
        }
        collector.require_non_empty("product.sku", &self.product.sku);
        collector.require_non_empty("product.name", &self.product.name);
        collector.require_non_empty("product.description", &self.product.description);
        collector.require_non_empty("product.brand", &self.product.brand);
        collector.require_non_empty("product.category", &self.product.category);
        collector.require_non_empty("product.batch", &self.product.batch);
        if let Some(image) = &self.product.image {
            collector.require_url("product.image", image);
        }
    }

    /// Checks the economic operator block.
    fn validate_operator(&self, collector: &mut Collector) {
        let operator = &self.economic_operator;
        collector.require_non_empty("economicOperator.legalName", &operator.legal_name);
        collector.require_non_empty("economicOperator.vatId", operator.vat_id.as_str());
        collector.require_non_empty(
            "economicOperator.address.streetAddress",
            &operator.address.street_address,
        );
        collector.require_non_empty(
            "economicOperator.address.addressLocality",
            &operator.address.address_locality,
        );
        collector.require_country(
            "economicOperator.address.addressCountry",
            operator.address.address_country.as_str(),
        );
        collector.require_email("economicOperator.contactPoint.email", &operator.contact_point.email);
        collector.require_non_empty(
            "economicOperator.contactPoint.telephone",
            &operator.contact_point.telephone,
        );
    }

    /// Checks the material composition list.
    fn validate_composition(&self, collector: &mut Collector) {
        if self.material_composition.is_empty() {
            collector.push("materialComposition", "must contain at least one entry");
        }
        for (index, entry) in self.material_composition.iter().enumerate() {
            let prefix = format!("materialComposition[{index}]");
            collector.require_non_empty(&format!("{prefix}.material"), &entry.material);
            collector.require_non_empty(&format!("{prefix}.materialType"), &entry.material_type);
            collector.require_range(&format!("{prefix}.percentage"), entry.percentage, 0.0, 100.0);
            collector.require_country(&format!("{prefix}.origin.country"), entry.origin.country.as_str());
            collector.require_non_empty(&format!("{prefix}.origin.region"), &entry.origin.region);
            if let Some(recycled) = entry.recycled_content {
                collector.require_range(&format!("{prefix}.recycledContent"), recycled, 0.0, 100.0);
            }
        }
    }

    /// Checks the supply-chain journey.
    fn validate_journey(&self, collector: &mut Collector) {
        if self.journey.is_empty() {
            collector.push("journey", "must contain at least one entry");
        }
        for (index, event) in self.journey.iter().enumerate() {
            Self::validate_journey_event(collector, index, event);
        }
    }

    /// Checks one journey step.
    fn validate_journey_event(collector: &mut Collector, index: usize, event: &SupplyChainEvent) {
        let prefix = format!("journey[{index}]");
        collector.require_non_empty(&format!("{prefix}.stage"), &event.stage);
        if event.tier < 1 {
            collector.push(format!("{prefix}.tier"), "must be at least 1");
        }
        collector.require_non_empty(&format!("{prefix}.facility.name"), &event.facility.name);
        collector.require_country(
            &format!("{prefix}.facility.location.country"),
            event.facility.location.country.as_str(),
        );
        collector.require_non_empty(&format!("{prefix}.process.startDate"), &event.process.start_date);
        collector.require_non_empty(&format!("{prefix}.process.endDate"), &event.process.end_date);
        if let Some(certifications) = &event.certifications {
            for (cert_index, certification) in certifications.iter().enumerate() {
                collector.require_url(
                    &format!("{prefix}.certifications[{cert_index}].document"),
                    &certification.document,
                );
            }
        }
    }

    /// Checks the optional footprint and durability blocks.
    fn validate_optional_blocks(&self, collector: &mut Collector) {
        if let Some(durability) = &self.durability_repairability {
            if let Some(score) = durability.durability_score {
                collector.require_range("durabilityRepairability.durabilityScore", score, 0.0, 10.0);
            }
            if let Some(index) = durability.repairability_index {
                collector.require_range("durabilityRepairability.repairabilityIndex", index, 0.0, 10.0);
            }
            if let Some(guide) = &durability.repair_guide {
                collector.require_url("durabilityRepairability.repairGuide", guide);
            }
        }
    }

    /// Checks the end-of-life block.
    fn validate_end_of_life(&self, collector: &mut Collector) {
        if let Some(score) = self.end_of_life.recyclability.recyclability_score {
            collector.require_range("endOfLife.recyclability.recyclabilityScore", score, 0.0, 10.0);
        }
        collector.require_non_empty(
            "endOfLife.recyclability.process",
            &self.end_of_life.recyclability.process,
        );
        collector.require_non_empty(
            "endOfLife.collectionScheme.instructions",
            &self.end_of_life.collection_scheme.instructions,
        );
    }
}

// ============================================================================
// SECTION: Assembly
// ============================================================================

impl DigitalProductPassport {
    /// Validates a submission and assembles the passport record.
    ///
    /// The derived `dppId` has the form `DPP-{gtin}-{batch}`; `version` and
    /// `createdDate` are assigned here and never accepted from the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when any submission constraint is
    /// violated; no record is produced in that case.
    pub fn assemble(
        submission: PassportSubmission,
        created_date: Timestamp,
    ) -> Result<Self, ValidationErrors> {
        submission.validate()?;
        let gtin = Gtin::parse(submission.product.gtin.clone())
            .map_err(|err| ValidationErrors::single("product.gtin", err.to_string()))?;
        let lot = LotNumber::new(submission.product.batch.clone());
        Ok(Self {
            dpp_id: DppId::derive(&gtin, &lot),
            version: PASSPORT_VERSION.to_string(),
            created_date,
            last_modified: None,
            product: submission.product,
            economic_operator: submission.economic_operator,
            material_composition: submission.material_composition,
            journey: submission.journey,
            environmental_footprint: submission.environmental_footprint,
            durability_repairability: submission.durability_repairability,
            use_phase: submission.use_phase,
            end_of_life: submission.end_of_life,
            completeness: None,
        })
    }
}
