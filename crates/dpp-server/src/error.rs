// crates/dpp-server/src/error.rs
// ============================================================================
// Module: API Error Mapping
// Description: Map domain errors onto HTTP statuses and JSON bodies.
// Purpose: Keep one fail-closed mapping from registry and resolver errors to
// wire responses.
// Dependencies: axum, dpp-core, serde_json
// ============================================================================

//! ## Overview
//! Every error leaving a handler passes through [`ApiError`]. Mapping rules:
//!
//! - Validation failures and malformed identifiers are 400 with the full
//!   violation list.
//! - Denied submissions are 401 when no credentials were presented, 403
//!   when a token was presented and rejected.
//! - Unknown (GTIN, lot) pairs are 404; a store failure is 503, never
//!   conflated with "not found".
//! - Duplicate (GTIN, lot) submissions are 409.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::http::header::WWW_AUTHENTICATE;
use axum::response::IntoResponse;
use axum::response::Response;
use dpp_core::FetchError;
use dpp_core::SubmitError;
use dpp_core::ValidationErrors;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: API Error
// ============================================================================

/// A fully mapped error response.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status for the response.
    pub status: StatusCode,
    /// JSON body for the response.
    pub body: Value,
}

impl ApiError {
    /// Builds an error with a plain message body.
    #[must_use]
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self { status, body: json!({ "error": message }) }
    }

    /// Builds the 400 response carrying every collected violation.
    #[must_use]
    pub fn validation(errors: &ValidationErrors) -> Self {
        let details: Vec<Value> = errors
            .violations
            .iter()
            .map(|violation| {
                json!({ "field": violation.field, "message": violation.message })
            })
            .collect();
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": "Validation failed", "details": details }),
        }
    }

    /// Maps a submission error, using credential presence for 401 vs 403.
    #[must_use]
    pub fn from_submit(error: &SubmitError, presented_credentials: bool) -> Self {
        match error {
            SubmitError::Denied(_) => {
                if presented_credentials {
                    Self::message(StatusCode::FORBIDDEN, "Not authorized to submit passports")
                } else {
                    Self::message(StatusCode::UNAUTHORIZED, "Authentication required")
                }
            }
            SubmitError::Validation(errors) => Self::validation(errors),
            SubmitError::Conflict { gtin, lot } => Self::message(
                StatusCode::CONFLICT,
                &format!("Passport already exists for GTIN {gtin} batch {lot}"),
            ),
            SubmitError::Store(store) => {
                Self::message(StatusCode::SERVICE_UNAVAILABLE, &store.to_string())
            }
        }
    }

    /// Maps a fetch error.
    #[must_use]
    pub fn from_fetch(error: &FetchError) -> Self {
        match error {
            FetchError::MalformedGtin(source) => {
                Self::message(StatusCode::BAD_REQUEST, &source.to_string())
            }
            FetchError::NotFound { gtin, lot } => {
                let message = match lot {
                    Some(lot) => format!("No passport found for GTIN {gtin} batch {lot}"),
                    None => format!("No passport found for GTIN {gtin}"),
                };
                Self::message(StatusCode::NOT_FOUND, &message)
            }
            FetchError::Store(store) => {
                Self::message(StatusCode::SERVICE_UNAVAILABLE, &store.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        if self.status == StatusCode::UNAUTHORIZED
            && let Ok(value) = "Bearer".parse()
        {
            response.headers_mut().insert(WWW_AUTHENTICATE, value);
        }
        response
    }
}
