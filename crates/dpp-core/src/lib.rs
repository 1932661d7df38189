// crates/dpp-core/src/lib.rs
// ============================================================================
// Module: DPP Core Library
// Description: Digital Product Passport record model and core logic.
// Purpose: Export the schema, validator, scorer, projector, resolver, and
// registry surfaces.
// Dependencies: serde, serde_json, thiserror, time, url
// ============================================================================

//! ## Overview
//! `dpp-core` implements the Digital Product Passport record model for
//! textile products together with its completeness scoring, access-tiered
//! projection, and identifier-resolution logic. The HTTP surface, durable
//! storage, and credential services are external collaborators reached
//! through the traits in [`interfaces`].
//!
//! The four core components — validator, scorer, projector, resolver — are
//! pure functions. They never catch-and-swallow: failures are explicit
//! result values and all user-facing formatting belongs to the host.

/// Pure passport components.
pub mod core;
/// Contract surfaces for storage and authorization.
pub mod interfaces;
/// Per-request orchestration.
pub mod runtime;

pub use crate::core::completeness::CHECKLIST;
pub use crate::core::completeness::ChecklistItem;
pub use crate::core::completeness::CompletenessReport;
pub use crate::core::completeness::resolve_path;
pub use crate::core::completeness::score_passport;
pub use crate::core::completeness::score_value;
pub use crate::core::identifiers::CountryCode;
pub use crate::core::identifiers::DppId;
pub use crate::core::identifiers::Gtin;
pub use crate::core::identifiers::LotNumber;
pub use crate::core::identifiers::MalformedGtinError;
pub use crate::core::identifiers::VatId;
pub use crate::core::projection::PassportView;
pub use crate::core::projection::Projection;
pub use crate::core::projection::PublicPassport;
pub use crate::core::projection::project;
pub use crate::core::record::DigitalProductPassport;
pub use crate::core::record::EconomicOperator;
pub use crate::core::record::EndOfLife;
pub use crate::core::record::EnvironmentalFootprint;
pub use crate::core::record::MaterialComposition;
pub use crate::core::record::PASSPORT_VERSION;
pub use crate::core::record::PassportSubmission;
pub use crate::core::record::ProcessType;
pub use crate::core::record::ProductIdentity;
pub use crate::core::record::SupplyChainEvent;
pub use crate::core::record::UsePhase;
pub use crate::core::resolve::CallerContext;
pub use crate::core::resolve::Resolution;
pub use crate::core::resolve::ResolutionDocument;
pub use crate::core::resolve::ViewerBase;
pub use crate::core::resolve::resolve;
pub use crate::core::time::Timestamp;
pub use crate::core::validate::ValidationErrors;
pub use crate::core::validate::Violation;
pub use crate::interfaces::AccessDenied;
pub use crate::interfaces::AllowAll;
pub use crate::interfaces::Capability;
pub use crate::interfaces::CapabilityCheck;
pub use crate::interfaces::PassportStore;
pub use crate::interfaces::StoreError;
pub use crate::interfaces::StoreStats;
pub use crate::runtime::FetchError;
pub use crate::runtime::InMemoryPassportStore;
pub use crate::runtime::PassportRegistry;
pub use crate::runtime::SubmitError;
