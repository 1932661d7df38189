// crates/dpp-core/src/core/record.rs
// ============================================================================
// Module: DPP Record Schema
// Description: Typed shapes for the Digital Product Passport and its blocks.
// Purpose: Define the canonical record model shared by validation, scoring,
// projection, and storage.
// Dependencies: crate::core::{completeness, identifiers, time}, serde
// ============================================================================

//! ## Overview
//! These types mirror the published passport JSON shape (camelCase on the
//! wire). A [`PassportSubmission`] is the caller-supplied subset; the
//! server-derived fields (`dppId`, `version`, `createdDate`) only exist on
//! the assembled [`DigitalProductPassport`]. Ordering of composition
//! entries, journey steps, impact categories, and care instructions is
//! significant and preserved from submission through storage to display.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::core::completeness::CompletenessReport;
use crate::core::identifiers::CountryCode;
use crate::core::identifiers::DppId;
use crate::core::identifiers::VatId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Product Identity
// ============================================================================

/// Product identity block keyed by GTIN and lot.
///
/// # Invariants
/// - `gtin` must match `^\d{13,14}$`; enforced by the validator, not by
///   deserialization, so all submission violations report together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdentity {
    /// Global Trade Item Number (13 or 14 digits).
    pub gtin: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Product display name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Brand name.
    pub brand: String,
    /// Product category label.
    pub category: String,
    /// Optional size label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Optional color label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Production lot identifier, scoped to this product.
    pub batch: String,
    /// Optional production date label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    /// Optional product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// ============================================================================
// SECTION: Economic Operator
// ============================================================================

/// Postal address of an economic operator.
///
/// # Invariants
/// - `address_country` is a two-character country code (validator-checked).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    /// Street address line.
    pub street_address: String,
    /// Locality (city or town).
    pub address_locality: String,
    /// Two-letter country code.
    pub address_country: CountryCode,
}

/// Contact point of an economic operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    /// Contact email address.
    pub email: String,
    /// Contact telephone number.
    pub telephone: String,
}

/// Legal entity in the supply chain (brand, manufacturer, or supplier).
///
/// # Invariants
/// - `vat_id` uniquely keys the operator; one operator may own many
///   passports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicOperator {
    /// Registered legal name.
    pub legal_name: String,
    /// Unique VAT identifier.
    pub vat_id: VatId,
    /// Postal address.
    pub address: PostalAddress,
    /// Contact point.
    pub contact_point: ContactPoint,
}

// ============================================================================
// SECTION: Material Composition
// ============================================================================

/// Origin of a material composition entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialOrigin {
    /// Two-letter country code.
    pub country: CountryCode,
    /// Region within the country.
    pub region: String,
    /// Optional named supplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

/// One entry in a passport's material composition list.
///
/// # Invariants
/// - `percentage` and `recycled_content` are bounded 0-100 per entry; the
///   list is deliberately not constrained to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialComposition {
    /// Material name.
    pub material: String,
    /// Material type label.
    pub material_type: String,
    /// Share of the product, 0-100.
    pub percentage: f64,
    /// Certificate labels attached to this material.
    pub certifications: Vec<String>,
    /// Material origin.
    pub origin: MaterialOrigin,
    /// Optional recycled content share, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recycled_content: Option<f64>,
}

// ============================================================================
// SECTION: Supply Chain Journey
// ============================================================================

/// Manufacturing process types recognized on journey steps.
///
/// # Invariants
/// - Variants are stable for serialization; membership is enforced at the
///   deserialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessType {
    /// Fiber agriculture.
    Agriculture,
    /// Yarn spinning.
    Spinning,
    /// Fabric weaving.
    Weaving,
    /// Fabric knitting.
    Knitting,
    /// Dyeing.
    Dyeing,
    /// Finishing.
    Finishing,
    /// Garment assembly.
    Assembly,
    /// Transport between facilities.
    Transport,
}

impl ProcessType {
    /// All recognized process types, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Agriculture,
        Self::Spinning,
        Self::Weaving,
        Self::Knitting,
        Self::Dyeing,
        Self::Finishing,
        Self::Assembly,
        Self::Transport,
    ];

    /// Returns the stable wire label for the process type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agriculture => "agriculture",
            Self::Spinning => "spinning",
            Self::Weaving => "weaving",
            Self::Knitting => "knitting",
            Self::Dyeing => "dyeing",
            Self::Finishing => "finishing",
            Self::Assembly => "assembly",
            Self::Transport => "transport",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a process type label is not a member of the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown process type: {raw:?}")]
pub struct UnknownProcessType {
    /// The rejected label.
    pub raw: String,
}

impl FromStr for ProcessType {
    type Err = UnknownProcessType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or_else(|| UnknownProcessType { raw: s.to_string() })
    }
}

/// Geographic coordinates of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCoordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

/// Location of a facility.
///
/// # Invariants
/// - `country` is a two-letter country code (validator-checked).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityLocation {
    /// Two-letter country code.
    pub country: CountryCode,
    /// Optional region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Optional city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Optional coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoCoordinates>,
}

/// Facility where a journey step took place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Facility display name.
    pub name: String,
    /// Optional facility identifier (e.g. GLN).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Facility location.
    pub location: FacilityLocation,
}

/// Process description for a journey step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    /// Process type, one of the fixed set.
    #[serde(rename = "type")]
    pub process_type: ProcessType,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Process start date label.
    pub start_date: String,
    /// Process end date label.
    pub end_date: String,
}

/// Material flowing into a journey step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialInput {
    /// Input material name.
    pub material: String,
    /// Input quantity.
    pub quantity: f64,
    /// Quantity unit.
    pub unit: String,
    /// Optional source lot for traceability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_batch: Option<String>,
}

/// Material or product flowing out of a journey step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialOutput {
    /// Optional output material name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Optional output product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Output quantity.
    pub quantity: f64,
    /// Quantity unit.
    pub unit: String,
}

/// Certification attached to a journey step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCertification {
    /// Certification scheme type.
    #[serde(rename = "type")]
    pub certification_type: String,
    /// Certificate number.
    pub certificate_number: String,
    /// Validity end date label.
    pub valid_until: String,
    /// URL of the certificate document.
    pub document: String,
}

/// One step of the supply-chain journey.
///
/// # Invariants
/// - `tier` is >= 1 (validator-checked).
/// - Journey order is chronological and preserved end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainEvent {
    /// Stage label (e.g. "Ginning").
    pub stage: String,
    /// Supply-chain depth, 1-based.
    pub tier: u32,
    /// Facility where the step took place.
    pub facility: Facility,
    /// Process description.
    pub process: ProcessStep,
    /// Optional input material flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<MaterialInput>,
    /// Optional output material flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<MaterialOutput>,
    /// Optional certifications for the step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<EventCertification>>,
}

// ============================================================================
// SECTION: Environmental Footprint
// ============================================================================

/// One environmental impact category measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactCategory {
    /// Impact indicator name (e.g. "climate change").
    pub indicator: String,
    /// Measured value.
    pub value: f64,
    /// Measurement unit.
    pub unit: String,
    /// Optional per-stage contribution mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_by_stage: Option<BTreeMap<String, f64>>,
}

/// Environmental footprint block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalFootprint {
    /// Assessment methodology label.
    pub methodology: String,
    /// Ordered impact category measurements.
    pub impact_categories: Vec<ImpactCategory>,
}

// ============================================================================
// SECTION: Durability and Repairability
// ============================================================================

/// Expected product lifespan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedLifespan {
    /// Lifespan value.
    pub value: f64,
    /// Lifespan unit (e.g. "years").
    pub unit: String,
}

/// Durability and repairability block.
///
/// # Invariants
/// - Scores are bounded 0-10 (validator-checked).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurabilityRepairability {
    /// Optional expected lifespan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_lifespan: Option<ExpectedLifespan>,
    /// Optional durability score, 0-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability_score: Option<f64>,
    /// Optional repairability index, 0-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repairability_index: Option<f64>,
    /// Optional repair guide URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair_guide: Option<String>,
}

// ============================================================================
// SECTION: Use Phase
// ============================================================================

/// One care instruction shown to consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareInstruction {
    /// Care icon key.
    pub icon: String,
    /// Instruction text.
    pub description: String,
}

/// Use-phase block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsePhase {
    /// Ordered care instructions.
    pub care_instructions: Vec<CareInstruction>,
}

// ============================================================================
// SECTION: End of Life
// ============================================================================

/// Recyclability sub-block.
///
/// # Invariants
/// - `recyclability_score` is bounded 0-10 (validator-checked).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recyclability {
    /// Whether the product is recyclable.
    pub recyclable: bool,
    /// Optional recyclability score, 0-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recyclability_score: Option<f64>,
    /// Recycling process description.
    pub process: String,
}

/// Collection scheme sub-block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionScheme {
    /// Whether a collection scheme is available.
    pub available: bool,
    /// Collection instructions shown to consumers.
    pub instructions: String,
}

/// End-of-life block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndOfLife {
    /// Recyclability details.
    pub recyclability: Recyclability,
    /// Collection scheme details.
    pub collection_scheme: CollectionScheme,
}

// ============================================================================
// SECTION: Submission
// ============================================================================

/// Caller-supplied passport submission.
///
/// # Invariants
/// - Never carries server-derived fields; `dppId` and `createdDate` are
///   assigned by assembly, never accepted from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportSubmission {
    /// Product identity.
    pub product: ProductIdentity,
    /// Owning economic operator.
    pub economic_operator: EconomicOperator,
    /// Non-empty ordered material composition list.
    pub material_composition: Vec<MaterialComposition>,
    /// Non-empty ordered supply-chain journey.
    pub journey: Vec<SupplyChainEvent>,
    /// Optional environmental footprint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental_footprint: Option<EnvironmentalFootprint>,
    /// Optional durability and repairability block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability_repairability: Option<DurabilityRepairability>,
    /// Use-phase block.
    pub use_phase: UsePhase,
    /// End-of-life block.
    pub end_of_life: EndOfLife,
}

// ============================================================================
// SECTION: Digital Product Passport
// ============================================================================

/// Record version assigned to newly assembled passports.
pub const PASSPORT_VERSION: &str = "1.0";

/// The assembled Digital Product Passport.
///
/// # Invariants
/// - `dpp_id` equals `DPP-{gtin}-{batch}` and is immutable after assembly.
/// - `completeness` is a transient read-time annotation, recomputed on every
///   read and never authoritative when loaded from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalProductPassport {
    /// Derived passport identifier.
    pub dpp_id: DppId,
    /// Record model version.
    pub version: String,
    /// Creation timestamp, assigned at assembly.
    pub created_date: Timestamp,
    /// Optional last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    /// Product identity.
    pub product: ProductIdentity,
    /// Owning economic operator.
    pub economic_operator: EconomicOperator,
    /// Non-empty ordered material composition list.
    pub material_composition: Vec<MaterialComposition>,
    /// Non-empty ordered supply-chain journey.
    pub journey: Vec<SupplyChainEvent>,
    /// Optional environmental footprint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental_footprint: Option<EnvironmentalFootprint>,
    /// Optional durability and repairability block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability_repairability: Option<DurabilityRepairability>,
    /// Use-phase block.
    pub use_phase: UsePhase,
    /// End-of-life block.
    pub end_of_life: EndOfLife,
    /// Transient completeness annotation, recomputed at read time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completeness: Option<CompletenessReport>,
}
