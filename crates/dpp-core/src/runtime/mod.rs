// crates/dpp-core/src/runtime/mod.rs
// ============================================================================
// Module: DPP Runtime
// Description: Orchestration over the pure core components.
// Purpose: Group host-facing runtime types under one namespace.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime layer owns the per-request flows that connect validation,
//! scoring, and projection to a record store.

/// Passport registry and in-memory store.
pub mod registry;

pub use registry::FetchError;
pub use registry::InMemoryPassportStore;
pub use registry::PassportRegistry;
pub use registry::SubmitError;
