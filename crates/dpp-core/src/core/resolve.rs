// crates/dpp-core/src/core/resolve.rs
// ============================================================================
// Module: DPP Identifier Resolver
// Description: GTIN-plus-lot resolution into viewer targets.
// Purpose: Map a scanned or queried identifier to a redirect or a structured
// resolution document, depending on caller context.
// Dependencies: crate::core::{identifiers, time}, serde, url
// ============================================================================

//! ## Overview
//! Resolution is a single-shot pure function of (identifier, lot, caller
//! context): it computes *where* the viewer should look and never touches
//! the record store. A physical QR scan arrives from a browser and gets a
//! 302-style redirect; a programmatic API consumer signals content
//! negotiation and gets a structured document instead. The GTIN format
//! check runs eagerly, before any downstream lookup, and is the same rule
//! the submission validator applies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use url::Url;

use crate::core::identifiers::Gtin;
use crate::core::identifiers::LotNumber;
use crate::core::identifiers::MalformedGtinError;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Caller Context
// ============================================================================

/// How the caller reached the resolution endpoint.
///
/// # Invariants
/// - Derived upstream from content negotiation: an Accept header naming
///   `application/json` marks an API caller; everything else is a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerContext {
    /// Machine client expecting a structured resolution document.
    Api,
    /// Browser or QR scan expecting a redirect.
    Browser,
}

// ============================================================================
// SECTION: Viewer Base
// ============================================================================

/// Base address of the public passport viewer.
///
/// # Invariants
/// - Absolute http(s) URL; validated at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerBase(Url);

impl ViewerBase {
    /// Wraps a validated viewer base URL.
    #[must_use]
    pub const fn new(base: Url) -> Self {
        Self(base)
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }

    /// Composes the canonical viewer target for a passport.
    ///
    /// The GTIN becomes a path segment (`/dpp/{gtin}`); the lot, when
    /// present, becomes a `batch` query parameter.
    #[must_use]
    pub fn target_for(&self, gtin: &Gtin, lot: Option<&LotNumber>) -> Url {
        let mut target = self.0.clone();
        // http(s) bases always support path segments; enforced by config.
        if let Ok(mut segments) = target.path_segments_mut() {
            segments.pop_if_empty().push("dpp").push(gtin.as_str());
        }
        if let Some(lot) = lot {
            target.query_pairs_mut().append_pair("batch", lot.as_str());
        }
        target
    }
}

// ============================================================================
// SECTION: Resolution Outcomes
// ============================================================================

/// Structured resolution document returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionDocument {
    /// The resolved GTIN.
    pub gtin: Gtin,
    /// The lot, when one was supplied.
    pub batch: Option<LotNumber>,
    /// Canonical viewer target for the passport.
    pub resolved_target: Url,
    /// When the resolution was computed (host-supplied).
    pub resolved_at: Timestamp,
}

/// Outcome of a resolution: a document or a redirect instruction.
///
/// # Invariants
/// - Both variants carry the same composed target for a given input.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Structured body for machine callers.
    Document(ResolutionDocument),
    /// 302-equivalent redirect for browsers and QR scans.
    Redirect {
        /// Redirect target.
        location: Url,
    },
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves a raw GTIN and optional lot into a viewer target.
///
/// # Errors
///
/// Returns [`MalformedGtinError`] when the GTIN fails its 13-or-14-digit
/// format rule; the check runs before anything else, independent of whether
/// a record would exist downstream.
pub fn resolve(
    gtin_raw: &str,
    lot: Option<&LotNumber>,
    caller: CallerContext,
    viewer: &ViewerBase,
    resolved_at: Timestamp,
) -> Result<Resolution, MalformedGtinError> {
    let gtin = Gtin::parse(gtin_raw)?;
    let target = viewer.target_for(&gtin, lot);
    Ok(match caller {
        CallerContext::Api => Resolution::Document(ResolutionDocument {
            gtin,
            batch: lot.cloned(),
            resolved_target: target,
            resolved_at,
        }),
        CallerContext::Browser => Resolution::Redirect { location: target },
    })
}
