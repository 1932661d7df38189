// crates/dpp-core/src/interfaces/mod.rs
// ============================================================================
// Module: DPP Interfaces
// Description: Backend-agnostic interfaces for storage and authorization.
// Purpose: Define the contract surfaces the passport registry depends on.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! The registry talks to its collaborators only through these traits. The
//! record store is an opaque keyed store addressed by the (GTIN, lot) pair;
//! store failures propagate untouched rather than being papered over with
//! placeholder data. Credential verification and session mechanics live
//! entirely outside the core and are consumed as a capability check passed
//! in by the host.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::Gtin;
use crate::core::identifiers::LotNumber;
use crate::core::record::DigitalProductPassport;

// ============================================================================
// SECTION: Passport Store
// ============================================================================

/// Record store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - An unavailable store is never conflated with a missing record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("passport store io error: {0}")]
    Io(String),
    /// Stored data is corrupted or fails integrity checks.
    #[error("passport store corruption: {0}")]
    Corrupt(String),
    /// A passport already exists for the (GTIN, lot) pair.
    #[error("passport already exists for gtin {gtin} lot {lot}")]
    Conflict {
        /// Conflicting GTIN.
        gtin: Gtin,
        /// Conflicting lot.
        lot: LotNumber,
    },
    /// Store reported an error.
    #[error("passport store error: {0}")]
    Store(String),
}

/// Aggregate counts for the administrative surface.
///
/// # Invariants
/// - `passports` equals the number of stored (GTIN, lot) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Stored passports.
    pub passports: u64,
    /// Distinct product GTINs.
    pub products: u64,
    /// Distinct economic operators.
    pub operators: u64,
}

/// Opaque keyed store for passport records.
///
/// The lookup key is the (GTIN, lot) pair, not a generated identifier; a
/// product may have many lots, and a lot has at most one passport.
pub trait PassportStore {
    /// Loads the passport for an exact (GTIN, lot) pair.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn find(&self, gtin: &Gtin, lot: &LotNumber)
    -> Result<Option<DigitalProductPassport>, StoreError>;

    /// Loads the first passport recorded for a GTIN, regardless of lot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn find_latest(&self, gtin: &Gtin) -> Result<Option<DigitalProductPassport>, StoreError>;

    /// Persists a newly assembled passport.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when the (GTIN, lot) pair already
    /// has a passport, and other [`StoreError`] variants when writing fails.
    fn insert(&self, passport: &DigitalProductPassport) -> Result<(), StoreError>;

    /// Lists stored passports in insertion order, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when listing fails.
    fn list(&self, limit: usize) -> Result<Vec<DigitalProductPassport>, StoreError>;

    /// Returns aggregate counts for the administrative surface.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when counting fails.
    fn stats(&self) -> Result<StoreStats, StoreError>;

    /// Reports store readiness for liveness/readiness probes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

impl<S: PassportStore + ?Sized> PassportStore for Box<S> {
    fn find(
        &self,
        gtin: &Gtin,
        lot: &LotNumber,
    ) -> Result<Option<DigitalProductPassport>, StoreError> {
        self.as_ref().find(gtin, lot)
    }

    fn find_latest(&self, gtin: &Gtin) -> Result<Option<DigitalProductPassport>, StoreError> {
        self.as_ref().find_latest(gtin)
    }

    fn insert(&self, passport: &DigitalProductPassport) -> Result<(), StoreError> {
        self.as_ref().insert(passport)
    }

    fn list(&self, limit: usize) -> Result<Vec<DigitalProductPassport>, StoreError> {
        self.as_ref().list(limit)
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        self.as_ref().stats()
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.as_ref().readiness()
    }
}

// ============================================================================
// SECTION: Capability Check
// ============================================================================

/// Capabilities gating write and administrative operations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Author and submit passports.
    SubmitPassport,
    /// Administrative access (stats, exports).
    Administer,
}

/// Error returned when a caller lacks a required capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("caller is not authorized for {capability:?}")]
pub struct AccessDenied {
    /// The capability that was required.
    pub capability: Capability,
}

/// Precondition gate over an opaque credential/session service.
///
/// The core holds no session state and performs no cryptography; hosts
/// implement this against their token or credential machinery.
pub trait CapabilityCheck {
    /// Checks that the caller holds the capability.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when the caller lacks the capability.
    fn check(&self, capability: Capability) -> Result<(), AccessDenied>;
}

/// Capability check that grants everything; for tests and trusted hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl CapabilityCheck for AllowAll {
    fn check(&self, _capability: Capability) -> Result<(), AccessDenied> {
        Ok(())
    }
}
