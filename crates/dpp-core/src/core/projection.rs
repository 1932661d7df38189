// crates/dpp-core/src/core/projection.rs
// ============================================================================
// Module: DPP Access Projection
// Description: Tier-based allow-list projection of passport records.
// Purpose: Derive the redacted public view served to anonymous consumers.
// Dependencies: crate::core::{completeness, identifiers, record}, serde
// ============================================================================

//! ## Overview
//! Projection narrows a full passport to the fields permitted at the
//! requested view tier. The public view is an allow-list, not a blacklist:
//! every surviving field is named explicitly, so adding a record field
//! defaults to withheld. Projection always produces a new value; the input
//! record is never mutated.
//!
//! `public` is the only restrictive tier in the current design. The
//! `supplier` and `admin` tiers are recognized as access-control labels on
//! storage but do not narrow the projected shape yet; this is a known open
//! gap, carried as-is rather than silently completed. Unrecognized or
//! absent tier labels likewise yield the unrestricted record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::completeness::CompletenessReport;
use crate::core::identifiers::CountryCode;
use crate::core::identifiers::DppId;
use crate::core::record::DigitalProductPassport;
use crate::core::record::EndOfLife;
use crate::core::record::EnvironmentalFootprint;
use crate::core::record::ProcessType;
use crate::core::record::ProductIdentity;
use crate::core::record::UsePhase;

// ============================================================================
// SECTION: Projection Selection
// ============================================================================

/// Closed set of projection shapes.
///
/// # Invariants
/// - Adding a tier that narrows the record means adding one variant and one
///   transformation; no conditionals elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Consumer-facing allow-list view.
    Public,
    /// The full record, unfiltered.
    Unrestricted,
}

impl Projection {
    /// Maps a requested tier label to a projection shape.
    ///
    /// Only `public` narrows; `supplier`, `admin`, and any unrecognized
    /// label fall back to the unrestricted shape (documented quirk).
    #[must_use]
    pub fn for_tier(tier: &str) -> Self {
        if tier == "public" { Self::Public } else { Self::Unrestricted }
    }
}

// ============================================================================
// SECTION: Public View Shapes
// ============================================================================

/// Public view of a material origin: country only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicOrigin {
    /// Two-letter origin country code.
    pub country: CountryCode,
}

/// Public view of a material composition entry.
///
/// Region, supplier, and recycled content are withheld.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMaterial {
    /// Material name.
    pub material: String,
    /// Share of the product, 0-100.
    pub percentage: f64,
    /// Certificate labels.
    pub certifications: Vec<String>,
    /// Origin, reduced to the country.
    pub origin: PublicOrigin,
}

/// Public view of a facility location: country only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLocation {
    /// Two-letter country code.
    pub country: CountryCode,
}

/// Public view of a facility: name and country only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFacility {
    /// Facility display name.
    pub name: String,
    /// Location, reduced to the country.
    pub location: PublicLocation,
}

/// Public view of a process step: type only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProcess {
    /// Process type.
    #[serde(rename = "type")]
    pub process_type: ProcessType,
}

/// Public view of a journey step.
///
/// Tier, facility identifier, coordinates, process dates and description,
/// material flows, and certifications are withheld.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicJourneyStep {
    /// Stage label.
    pub stage: String,
    /// Facility, reduced to name and country.
    pub facility: PublicFacility,
    /// Process, reduced to its type.
    pub process: PublicProcess,
}

/// Consumer-facing passport view.
///
/// # Invariants
/// - Never carries `economicOperator` or durability detail.
/// - Journey order is preserved from the source record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPassport {
    /// Derived passport identifier.
    pub dpp_id: DppId,
    /// Product identity, unchanged.
    pub product: ProductIdentity,
    /// Reduced material composition entries, in source order.
    pub material_composition: Vec<PublicMaterial>,
    /// Reduced journey steps, in source order.
    pub journey: Vec<PublicJourneyStep>,
    /// Use-phase block, unchanged (public-safe by design).
    pub use_phase: UsePhase,
    /// End-of-life block, unchanged (public-safe by design).
    pub end_of_life: EndOfLife,
    /// Environmental block, unchanged (public-safe by design).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environmental_footprint: Option<EnvironmentalFootprint>,
    /// Transient completeness annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<CompletenessReport>,
}

/// A passport projected for a view tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PassportView {
    /// The unrestricted full record.
    Full(Box<DigitalProductPassport>),
    /// The consumer-facing allow-list view.
    Public(Box<PublicPassport>),
}

// ============================================================================
// SECTION: Projection
// ============================================================================

/// Projects a passport for the selected shape, returning a new value.
#[must_use]
pub fn project(passport: DigitalProductPassport, projection: Projection) -> PassportView {
    match projection {
        Projection::Unrestricted => PassportView::Full(Box::new(passport)),
        Projection::Public => PassportView::Public(Box::new(project_public(passport))),
    }
}

/// Applies the public allow-list transformation.
fn project_public(passport: DigitalProductPassport) -> PublicPassport {
    let material_composition = passport
        .material_composition
        .into_iter()
        .map(|entry| PublicMaterial {
            material: entry.material,
            percentage: entry.percentage,
            certifications: entry.certifications,
            origin: PublicOrigin { country: entry.origin.country },
        })
        .collect();
    let journey = passport
        .journey
        .into_iter()
        .map(|step| PublicJourneyStep {
            stage: step.stage,
            facility: PublicFacility {
                name: step.facility.name,
                location: PublicLocation { country: step.facility.location.country },
            },
            process: PublicProcess { process_type: step.process.process_type },
        })
        .collect();
    PublicPassport {
        dpp_id: passport.dpp_id,
        product: passport.product,
        material_composition,
        journey,
        use_phase: passport.use_phase,
        end_of_life: passport.end_of_life,
        environmental_footprint: passport.environmental_footprint,
        completeness: passport.completeness,
    }
}
