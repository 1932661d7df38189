// crates/dpp-server/src/server.rs
// ============================================================================
// Module: HTTP Server
// Description: Axum routes and handlers for the passport surface.
// Purpose: Orchestrate registry, resolver, and auth per request and map
// every outcome onto the wire contract.
// Dependencies: axum, dpp-config, dpp-core, serde, serde_json, time
// ============================================================================

//! ## Overview
//! Route handlers for the passport HTTP surface. Handlers hold no domain
//! logic: they extract request inputs, read the wall clock, evaluate the
//! bearer gate, and delegate to [`PassportRegistry`] and the resolver. All
//! error mapping lives in [`crate::error`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::ACCEPT;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use dpp_config::DppConfig;
use dpp_core::CallerContext;
use dpp_core::LotNumber;
use dpp_core::PassportRegistry;
use dpp_core::PassportStore;
use dpp_core::PassportSubmission;
use dpp_core::Resolution;
use dpp_core::Timestamp;
use dpp_core::ViewerBase;
use dpp_core::resolve;
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;

use crate::auth::BearerAuth;
use crate::auth::RequestGate;
use crate::error::ApiError;
use crate::telemetry::DppMetrics;
use crate::telemetry::HttpMetricEvent;
use crate::telemetry::RequestOutcome;
use crate::telemetry::RouteLabel;


// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default listing page size.
const DEFAULT_LIST_LIMIT: usize = 50;
/// Maximum listing page size.
const MAX_LIST_LIMIT: usize = 200;
/// Default access tier when the `view` parameter is absent.
const DEFAULT_VIEW: &str = "public";

// ============================================================================
// SECTION: State
// ============================================================================

/// Backing store type selected at startup.
pub type DynPassportStore = Box<dyn PassportStore + Send + Sync>;

/// Shared server state.
pub struct AppState {
    /// Registry orchestrating validation, scoring, and projection.
    pub registry: PassportRegistry<DynPassportStore>,
    /// Viewer base composed into resolution targets.
    pub viewer: ViewerBase,
    /// Bearer authenticator; `None` disables write gating (loopback only).
    pub auth: Option<BearerAuth>,
    /// Metrics sink.
    pub metrics: Arc<dyn DppMetrics>,
    /// Request body limit in bytes.
    pub max_body_bytes: usize,
}

/// Builds server state from validated configuration.
///
/// # Errors
///
/// Returns [`dpp_config::ConfigError`] when the viewer base is invalid.
pub fn build_state(
    config: &DppConfig,
    store: DynPassportStore,
    metrics: Arc<dyn DppMetrics>,
) -> Result<AppState, dpp_config::ConfigError> {
    let viewer = ViewerBase::new(config.viewer_base()?);
    let auth = config
        .server
        .auth
        .as_ref()
        .map(|auth| BearerAuth::new(auth.bearer_tokens.clone()));
    Ok(AppState {
        registry: PassportRegistry::new(store),
        viewer,
        auth,
        metrics,
        max_body_bytes: config.server.max_body_bytes,
    })
}

/// Builds the router over shared state.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_body_bytes;
    Router::new()
        .route("/healthz", get(handle_health))
        .route("/api/v1/dpp", get(handle_list).post(handle_submit))
        .route("/api/v1/dpp/{gtin}", get(handle_fetch))
        .route("/resolve/{gtin}", get(handle_resolve))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

// ============================================================================
// SECTION: Query Parameters
// ============================================================================

/// Query parameters for listing.
#[derive(Debug, Deserialize)]
struct ListParams {
    /// Maximum number of passports to return.
    limit: Option<usize>,
}

/// Query parameters for passport fetch.
#[derive(Debug, Deserialize)]
struct FetchParams {
    /// Batch/lot selector; the first recorded lot is used when absent.
    batch: Option<String>,
    /// Requested access tier.
    view: Option<String>,
}

/// Query parameters for GTIN resolution.
#[derive(Debug, Deserialize)]
struct ResolveParams {
    /// Batch/lot carried through to the viewer target.
    batch: Option<String>,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// `GET /healthz`: readiness probe over the backing store.
async fn handle_health(State(state): State<Arc<AppState>>) -> Response {
    let started = Instant::now();
    let response = match state.registry.store().readiness() {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response(),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "error": err.to_string() })),
        )
            .into_response(),
    };
    record(&state, RouteLabel::Health, response.status(), started);
    response
}

/// `GET /api/v1/dpp`: list stored passports with completeness annotations.
async fn handle_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Response {
    let started = Instant::now();
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
    let response = match state.registry.list(limit) {
        Ok(passports) => {
            let count = passports.len();
            (StatusCode::OK, Json(json!({ "data": passports, "count": count }))).into_response()
        }
        Err(err) => {
            ApiError::message(StatusCode::SERVICE_UNAVAILABLE, &err.to_string()).into_response()
        }
    };
    record(&state, RouteLabel::ListPassports, response.status(), started);
    response
}

/// `POST /api/v1/dpp`: bearer-gated passport submission.
async fn handle_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(submission): Json<PassportSubmission>,
) -> Response {
    let started = Instant::now();
    let gate = request_gate(&state, &headers);
    let response = match host_timestamp() {
        Some(submitted_at) => match state.registry.submit(submission, submitted_at, &gate) {
            Ok(passport) => {
                (StatusCode::CREATED, Json(json!({ "data": passport }))).into_response()
            }
            Err(err) => ApiError::from_submit(&err, gate.presented_credentials()).into_response(),
        },
        None => ApiError::message(StatusCode::SERVICE_UNAVAILABLE, "Clock unavailable")
            .into_response(),
    };
    record(&state, RouteLabel::SubmitPassport, response.status(), started);
    response
}

/// `GET /api/v1/dpp/{gtin}`: fetch a passport for the requested tier.
async fn handle_fetch(
    State(state): State<Arc<AppState>>,
    Path(gtin): Path<String>,
    Query(params): Query<FetchParams>,
) -> Response {
    let started = Instant::now();
    let tier = params.view.as_deref().unwrap_or(DEFAULT_VIEW);
    let lot = params.batch.as_deref().map(LotNumber::new);
    let response = match state.registry.fetch(&gtin, lot.as_ref(), tier) {
        Ok(view) => {
            (StatusCode::OK, Json(json!({ "data": view, "accessTier": tier }))).into_response()
        }
        Err(err) => ApiError::from_fetch(&err).into_response(),
    };
    record(&state, RouteLabel::GetPassport, response.status(), started);
    response
}

/// `GET /resolve/{gtin}`: content-negotiated GTIN resolution.
async fn handle_resolve(
    State(state): State<Arc<AppState>>,
    Path(gtin): Path<String>,
    Query(params): Query<ResolveParams>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let caller = caller_context(&headers);
    let lot = params.batch.as_deref().map(LotNumber::new);
    let response = match host_timestamp() {
        Some(resolved_at) => {
            match resolve(&gtin, lot.as_ref(), caller, &state.viewer, resolved_at) {
                Ok(Resolution::Document(document)) => {
                    (StatusCode::OK, Json(document)).into_response()
                }
                Ok(Resolution::Redirect { location }) => {
                    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
                }
                Err(err) => {
                    ApiError::message(StatusCode::BAD_REQUEST, &err.to_string()).into_response()
                }
            }
        }
        None => ApiError::message(StatusCode::SERVICE_UNAVAILABLE, "Clock unavailable")
            .into_response(),
    };
    record(&state, RouteLabel::Resolve, response.status(), started);
    response
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Evaluates the bearer gate for the request, open when auth is disabled.
fn request_gate(state: &AppState, headers: &HeaderMap) -> RequestGate {
    state.auth.as_ref().map_or_else(RequestGate::open, |auth| auth.gate(headers))
}

/// Classifies the caller from the `Accept` header.
///
/// Callers accepting `application/json` get the structured document;
/// everything else is treated as a browser and redirected.
fn caller_context(headers: &HeaderMap) -> CallerContext {
    let accepts_json = headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));
    if accepts_json { CallerContext::Api } else { CallerContext::Browser }
}

/// Reads the wall clock into a host-supplied timestamp.
fn host_timestamp() -> Option<Timestamp> {
    Timestamp::from_unix_seconds(OffsetDateTime::now_utc().unix_timestamp())
}

/// Records request metrics for the route.
fn record(state: &AppState, route: RouteLabel, status: StatusCode, started: Instant) {
    let event = HttpMetricEvent {
        route,
        outcome: RequestOutcome::from_status(status.as_u16()),
        status: status.as_u16(),
    };
    state.metrics.record_request(event);
    state.metrics.record_latency(event, started.elapsed());
}
