// crates/dpp-server/src/lib.rs
// ============================================================================
// Module: DPP Server
// Description: HTTP surface for passport submission, retrieval, and
// resolution.
// Purpose: Wire the passport registry, resolver, and stores behind axum
// routes with bearer-token gating and fail-closed error mapping.
// Dependencies: axum, dpp-config, dpp-core, dpp-store-sqlite, subtle, tokio
// ============================================================================

//! ## Overview
//! HTTP host for the Digital Product Passport core. Routes:
//!
//! - `GET /healthz`: store readiness probe.
//! - `GET /api/v1/dpp`: list stored passports with completeness annotations.
//! - `POST /api/v1/dpp`: bearer-gated passport submission.
//! - `GET /api/v1/dpp/{gtin}`: fetch by GTIN with optional `batch` and
//!   `view` query parameters.
//! - `GET /resolve/{gtin}`: content-negotiated GTIN resolution; API callers
//!   receive a resolution document, browsers a redirect to the viewer.
//!
//! The server owns all wall-clock reads and credential checks; the core
//! stays deterministic and host-driven.

pub mod auth;
pub mod error;
pub mod server;
pub mod telemetry;

pub use auth::BearerAuth;
pub use auth::RequestGate;
pub use error::ApiError;
pub use server::AppState;
pub use server::build_router;
pub use server::build_state;
pub use telemetry::DppMetrics;
pub use telemetry::HttpMetricEvent;
pub use telemetry::NoopMetrics;
pub use telemetry::RequestOutcome;
pub use telemetry::RouteLabel;
