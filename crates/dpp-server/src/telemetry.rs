// crates/dpp-server/src/telemetry.rs
// ============================================================================
// Module: Server Telemetry
// Description: Observability hooks for the passport HTTP surface.
// Purpose: Provide metric events and latency hooks without hard deps.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for HTTP request counters and
//! latencies. It is intentionally dependency-light so downstream deployments
//! can plug in Prometheus or OpenTelemetry without redesign. Labels are
//! server-chosen constants; no request data flows into metric identity.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Route classification for request metrics.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RouteLabel {
    /// `GET /healthz`.
    Health,
    /// `GET /api/v1/dpp`.
    ListPassports,
    /// `GET /api/v1/dpp/{gtin}`.
    GetPassport,
    /// `POST /api/v1/dpp`.
    SubmitPassport,
    /// `GET /resolve/{gtin}`.
    Resolve,
}

impl RouteLabel {
    /// Returns a stable label for the route.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Health => "healthz",
            Self::ListPassports => "list_passports",
            Self::GetPassport => "get_passport",
            Self::SubmitPassport => "submit_passport",
            Self::Resolve => "resolve",
        }
    }
}

/// Request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RequestOutcome {
    /// 2xx or 3xx response.
    Ok,
    /// 4xx response.
    ClientError,
    /// 5xx response.
    ServerError,
}

impl RequestOutcome {
    /// Classifies an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            100..=399 => Self::Ok,
            400..=499 => Self::ClientError,
            _ => Self::ServerError,
        }
    }

    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
        }
    }
}

/// HTTP request metric event payload.
#[derive(Debug, Clone, Copy)]
pub struct HttpMetricEvent {
    /// Route classification.
    pub route: RouteLabel,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// HTTP status code.
    pub status: u16,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for HTTP requests and latencies.
pub trait DppMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: HttpMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: HttpMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl DppMetrics for NoopMetrics {
    fn record_request(&self, _event: HttpMetricEvent) {}

    fn record_latency(&self, _event: HttpMetricEvent, _latency: Duration) {}
}
