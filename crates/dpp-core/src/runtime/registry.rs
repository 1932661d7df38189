// crates/dpp-core/src/runtime/registry.rs
// ============================================================================
// Module: DPP Passport Registry
// Description: Per-request orchestration of validation, scoring, projection,
// and storage.
// Purpose: Provide the submit/fetch/list flows hosts invoke once per call.
// Dependencies: crate::core, crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! The registry wires the pure core components to a [`PassportStore`].
//! Submission runs the capability gate, validates, assembles, and persists.
//! Reads recompute the completeness annotation on every fetch so it always
//! reflects the current checklist, then project for the requested tier.
//! Nothing here spans requests; concurrent calls are independent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Mutex;

use thiserror::Error;

use crate::core::completeness::score_passport;
use crate::core::identifiers::Gtin;
use crate::core::identifiers::LotNumber;
use crate::core::identifiers::MalformedGtinError;
use crate::core::projection::PassportView;
use crate::core::projection::Projection;
use crate::core::projection::project;
use crate::core::record::DigitalProductPassport;
use crate::core::record::PassportSubmission;
use crate::core::time::Timestamp;
use crate::core::validate::ValidationErrors;
use crate::interfaces::AccessDenied;
use crate::interfaces::Capability;
use crate::interfaces::CapabilityCheck;
use crate::interfaces::PassportStore;
use crate::interfaces::StoreError;
use crate::interfaces::StoreStats;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures of the submission flow.
///
/// # Invariants
/// - Variants are stable for programmatic handling; hosts map them to
///   status codes without string matching.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The caller lacks the submit capability.
    #[error(transparent)]
    Denied(#[from] AccessDenied),
    /// The submission violated one or more constraints.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// A passport already exists for the (GTIN, lot) pair.
    #[error("passport already exists for gtin {gtin} lot {lot}")]
    Conflict {
        /// Conflicting GTIN.
        gtin: Gtin,
        /// Conflicting lot.
        lot: LotNumber,
    },
    /// The record store failed; propagated untouched.
    #[error(transparent)]
    Store(StoreError),
}

/// Failures of the read flow.
///
/// # Invariants
/// - A malformed identifier is never conflated with a missing record.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The GTIN failed its format rule before any lookup.
    #[error(transparent)]
    MalformedGtin(#[from] MalformedGtinError),
    /// No passport exists for the identifier.
    #[error("no passport found for gtin {gtin}")]
    NotFound {
        /// The GTIN that was looked up.
        gtin: Gtin,
        /// The lot that was looked up, when one was supplied.
        lot: Option<LotNumber>,
    },
    /// The record store failed; propagated untouched.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Per-request orchestrator over a passport store.
#[derive(Debug)]
pub struct PassportRegistry<S> {
    /// Backing record store.
    store: S,
}

impl<S: PassportStore> PassportRegistry<S> {
    /// Creates a registry over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Validates, assembles, and persists a submission.
    ///
    /// The capability gate runs first; an unauthorized caller learns
    /// nothing about the submission's validity.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the caller is denied, the submission is
    /// invalid, the (GTIN, lot) pair already has a passport, or the store
    /// fails.
    pub fn submit(
        &self,
        submission: PassportSubmission,
        submitted_at: Timestamp,
        authority: &dyn CapabilityCheck,
    ) -> Result<DigitalProductPassport, SubmitError> {
        authority.check(Capability::SubmitPassport)?;
        let passport = DigitalProductPassport::assemble(submission, submitted_at)?;
        match self.store.insert(&passport) {
            Ok(()) => Ok(passport),
            Err(StoreError::Conflict { gtin, lot }) => Err(SubmitError::Conflict { gtin, lot }),
            Err(other) => Err(SubmitError::Store(other)),
        }
    }

    /// Loads, scores, and projects a passport for the requested tier.
    ///
    /// The completeness annotation is recomputed on every read and attached
    /// before projection, so both full and public views carry it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the GTIN is malformed, no passport
    /// exists, or the store fails.
    pub fn fetch(
        &self,
        gtin_raw: &str,
        lot: Option<&LotNumber>,
        tier: &str,
    ) -> Result<PassportView, FetchError> {
        let gtin = Gtin::parse(gtin_raw)?;
        let found = match lot {
            Some(lot) => self.store.find(&gtin, lot)?,
            None => self.store.find_latest(&gtin)?,
        };
        let Some(mut passport) = found else {
            return Err(FetchError::NotFound { gtin, lot: lot.cloned() });
        };
        passport.completeness = Some(score_passport(&passport));
        Ok(project(passport, Projection::for_tier(tier)))
    }

    /// Lists stored passports with fresh completeness annotations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when listing fails.
    pub fn list(&self, limit: usize) -> Result<Vec<DigitalProductPassport>, StoreError> {
        let mut passports = self.store.list(limit)?;
        for passport in &mut passports {
            passport.completeness = Some(score_passport(passport));
        }
        Ok(passports)
    }

    /// Returns aggregate counts for the administrative surface.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when counting fails.
    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        self.store.stats()
    }
}

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory passport store for tests and examples.
///
/// # Invariants
/// - Preserves insertion order for listing.
#[derive(Debug, Default)]
pub struct InMemoryPassportStore {
    /// Stored passports in insertion order.
    passports: Mutex<Vec<DigitalProductPassport>>,
}

impl InMemoryPassportStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a closure over the locked passport list.
    fn with_passports<T>(
        &self,
        operation: impl FnOnce(&mut Vec<DigitalProductPassport>) -> T,
    ) -> Result<T, StoreError> {
        let mut guard = self
            .passports
            .lock()
            .map_err(|_poisoned| StoreError::Store("in-memory store lock poisoned".to_string()))?;
        Ok(operation(&mut guard))
    }
}

impl PassportStore for InMemoryPassportStore {
    fn find(
        &self,
        gtin: &Gtin,
        lot: &LotNumber,
    ) -> Result<Option<DigitalProductPassport>, StoreError> {
        self.with_passports(|passports| {
            passports
                .iter()
                .find(|passport| {
                    passport.product.gtin == gtin.as_str() && passport.product.batch == lot.as_str()
                })
                .cloned()
        })
    }

    fn find_latest(&self, gtin: &Gtin) -> Result<Option<DigitalProductPassport>, StoreError> {
        self.with_passports(|passports| {
            passports.iter().find(|passport| passport.product.gtin == gtin.as_str()).cloned()
        })
    }

    fn insert(&self, passport: &DigitalProductPassport) -> Result<(), StoreError> {
        let gtin = Gtin::parse(passport.product.gtin.clone())
            .map_err(|err| StoreError::Store(err.to_string()))?;
        let lot = LotNumber::new(passport.product.batch.clone());
        self.with_passports(|passports| {
            let duplicate = passports.iter().any(|stored| {
                stored.product.gtin == passport.product.gtin
                    && stored.product.batch == passport.product.batch
            });
            if duplicate {
                Err(StoreError::Conflict { gtin, lot })
            } else {
                passports.push(passport.clone());
                Ok(())
            }
        })?
    }

    fn list(&self, limit: usize) -> Result<Vec<DigitalProductPassport>, StoreError> {
        self.with_passports(|passports| passports.iter().take(limit).cloned().collect())
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        self.with_passports(|passports| {
            let products: BTreeSet<&str> =
                passports.iter().map(|passport| passport.product.gtin.as_str()).collect();
            let operators: BTreeSet<&str> = passports
                .iter()
                .map(|passport| passport.economic_operator.vat_id.as_str())
                .collect();
            StoreStats {
                passports: passports.len() as u64,
                products: products.len() as u64,
                operators: operators.len() as u64,
            }
        })
    }
}
