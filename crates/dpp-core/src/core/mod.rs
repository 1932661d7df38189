// crates/dpp-core/src/core/mod.rs
// ============================================================================
// Module: DPP Core Components
// Description: Record schema, validation, scoring, projection, and resolution.
// Purpose: Group the pure passport components under one namespace.
// Dependencies: serde, serde_json, thiserror, time, url
// ============================================================================

//! ## Overview
//! Everything under `core` is a pure, synchronous function of its inputs:
//! no internal mutable state, no blocking, no wall-clock reads. Hosts
//! compose these components once per request.

/// Completeness scoring over the regulatory checklist.
pub mod completeness;
/// Canonical identifiers with stable wire forms.
pub mod identifiers;
/// Tier-based access projection.
pub mod projection;
/// Typed passport record shapes.
pub mod record;
/// GTIN resolution into viewer targets.
pub mod resolve;
/// Canonical timestamp representation.
pub mod time;
/// Submission validation and passport assembly.
pub mod validate;
