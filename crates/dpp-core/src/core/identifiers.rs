// crates/dpp-core/src/core/identifiers.rs
// ============================================================================
// Module: DPP Identifiers
// Description: Canonical identifiers for products, lots, operators, and passports.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! This module defines the canonical identifiers used throughout the passport
//! core. The GTIN is the only identifier with a format invariant enforced at
//! construction; the validator and the resolver both route through
//! [`Gtin::parse`] so the digit-count rule cannot drift between them.
//! Lot numbers, VAT identifiers, and country codes are opaque newtypes whose
//! semantic checks live at the validation boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: GTIN
// ============================================================================

/// Error returned when a GTIN fails its digit-count format rule.
///
/// # Invariants
/// - Raised eagerly, before any store lookup is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid GTIN format: must be 13 or 14 digits, got {raw:?}")]
pub struct MalformedGtinError {
    /// The rejected input, echoed for diagnostics.
    pub raw: String,
}

/// Global Trade Item Number identifying a product type.
///
/// # Invariants
/// - Always 13 or 14 ASCII digits; enforced by [`Gtin::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gtin(String);

impl Gtin {
    /// Parses a GTIN, enforcing the 13-or-14-digit format.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedGtinError`] when the input is not 13 or 14 ASCII
    /// digits.
    pub fn parse(raw: impl Into<String>) -> Result<Self, MalformedGtinError> {
        let raw = raw.into();
        let digits_only = raw.bytes().all(|byte| byte.is_ascii_digit());
        if digits_only && (raw.len() == 13 || raw.len() == 14) {
            Ok(Self(raw))
        } else {
            Err(MalformedGtinError { raw })
        }
    }

    /// Returns the GTIN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Lot Number
// ============================================================================

/// Production lot identifier, scoped to one product.
///
/// # Invariants
/// - Opaque UTF-8 string; non-emptiness is enforced by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LotNumber(String);

impl LotNumber {
    /// Creates a new lot number.
    #[must_use]
    pub fn new(lot: impl Into<String>) -> Self {
        Self(lot.into())
    }

    /// Returns the lot number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for LotNumber {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LotNumber {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Passport Identifier
// ============================================================================

/// Derived passport identifier with the stable form `DPP-{gtin}-{lot}`.
///
/// # Invariants
/// - Constructed only from a parsed [`Gtin`] and a [`LotNumber`]; immutable
///   once assigned at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DppId(String);

impl DppId {
    /// Derives the passport identifier from its product and lot keys.
    #[must_use]
    pub fn derive(gtin: &Gtin, lot: &LotNumber) -> Self {
        Self(format!("DPP-{gtin}-{lot}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Operator Identifier
// ============================================================================

/// VAT identifier keying an economic operator.
///
/// # Invariants
/// - Opaque UTF-8 string, unique per operator; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VatId(String);

impl VatId {
    /// Creates a new VAT identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for VatId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VatId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Country Code
// ============================================================================

/// ISO 3166-1 alpha-2 country code carried on addresses and origins.
///
/// # Invariants
/// - Stored verbatim; the two-character rule is checked by the validator so
///   that all violations in a submission can be reported together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// Creates a new country code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reports whether the code satisfies the two-character rule.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.0.chars().count() == 2
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CountryCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CountryCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
