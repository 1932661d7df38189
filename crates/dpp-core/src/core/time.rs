// crates/dpp-core/src/core/time.rs
// ============================================================================
// Module: DPP Time Model
// Description: Canonical timestamp representation for passport records.
// Purpose: Provide deterministic, host-supplied time values with RFC 3339 wire form.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! The passport core never reads wall-clock time. Hosts supply [`Timestamp`]
//! values at submission and resolution boundaries, which keeps the core
//! functions pure and replayable. On the wire a timestamp is an RFC 3339
//! string, matching the published JSON shapes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Canonical timestamp used on passport records and resolver documents.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads
///   wall-clock time.
/// - Serializes as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl Timestamp {
    /// Wraps an explicit datetime value.
    #[must_use]
    pub const fn new(value: OffsetDateTime) -> Self {
        Self(value)
    }

    /// Creates a timestamp from unix epoch seconds.
    ///
    /// Returns `None` when the value is outside the representable range.
    #[must_use]
    pub fn from_unix_seconds(seconds: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(seconds).ok().map(Self)
    }

    /// Returns the timestamp as unix epoch seconds.
    #[must_use]
    pub const fn unix_seconds(&self) -> i64 {
        self.0.unix_timestamp()
    }

    /// Returns the underlying datetime value.
    #[must_use]
    pub const fn as_datetime(&self) -> OffsetDateTime {
        self.0
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Self(value)
    }
}
