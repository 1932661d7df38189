// crates/dpp-server/src/auth.rs
// ============================================================================
// Module: Bearer Authentication
// Description: Bearer-token gate over the core capability check seam.
// Purpose: Decide submission authorization per request with constant-time
// token comparison.
// Dependencies: axum, dpp-core, subtle
// ============================================================================

//! ## Overview
//! Bearer-token authentication for write endpoints. Tokens are compared in
//! constant time across the full configured set, so neither the matching
//! token index nor a near-miss is observable from timing. The outcome is a
//! [`RequestGate`] handed to the registry as its capability check; handlers
//! never re-derive authorization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use dpp_core::AccessDenied;
use dpp_core::Capability;
use dpp_core::CapabilityCheck;
use subtle::ConstantTimeEq;

// ============================================================================
// SECTION: Bearer Auth
// ============================================================================

/// Configured bearer-token authenticator.
///
/// # Invariants
/// - The token set is non-empty; enforced by config validation.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    /// Accepted bearer tokens.
    tokens: Vec<String>,
}

impl BearerAuth {
    /// Creates an authenticator over the accepted token set.
    #[must_use]
    pub const fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Evaluates the request headers into a per-request gate.
    ///
    /// Every configured token is compared even after a match, keeping the
    /// comparison count independent of the input.
    #[must_use]
    pub fn gate(&self, headers: &HeaderMap) -> RequestGate {
        let presented = bearer_token(headers);
        let Some(presented) = presented else {
            return RequestGate { authorized: false, presented_credentials: false };
        };
        let mut matched = false;
        for token in &self.tokens {
            if token.len() == presented.len() {
                matched |= bool::from(token.as_bytes().ct_eq(presented.as_bytes()));
            }
        }
        RequestGate { authorized: matched, presented_credentials: true }
    }
}

/// Extracts the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// ============================================================================
// SECTION: Request Gate
// ============================================================================

/// Per-request authorization decision consumed by the registry.
#[derive(Debug, Clone, Copy)]
pub struct RequestGate {
    /// Whether the caller presented a valid token.
    authorized: bool,
    /// Whether any credentials were presented at all.
    presented_credentials: bool,
}

impl RequestGate {
    /// Gate that grants everything; used when no auth is configured.
    #[must_use]
    pub const fn open() -> Self {
        Self { authorized: true, presented_credentials: true }
    }

    /// Returns whether the caller presented credentials.
    ///
    /// Distinguishes a missing token (401) from a rejected one (403).
    #[must_use]
    pub const fn presented_credentials(&self) -> bool {
        self.presented_credentials
    }
}

impl CapabilityCheck for RequestGate {
    fn check(&self, capability: Capability) -> Result<(), AccessDenied> {
        if self.authorized { Ok(()) } else { Err(AccessDenied { capability }) }
    }
}
