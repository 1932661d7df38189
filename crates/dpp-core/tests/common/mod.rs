// crates/dpp-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Fixtures
// Description: Shared passport fixtures for dpp-core integration tests.
// Purpose: Build a complete, valid submission with one material and one
// journey step.
// Dependencies: dpp-core, serde_json
// ============================================================================

//! Shared fixtures for passport tests.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

use dpp_core::PassportSubmission;
use serde_json::Value;
use serde_json::json;

/// Fixture GTIN used across the suite.
pub const FIXTURE_GTIN: &str = "01234567890123";

/// Fixture lot number used across the suite.
pub const FIXTURE_LOT: &str = "LOT-001";

/// Returns the fixture submission as loose JSON.
#[must_use]
pub fn submission_json() -> Value {
    json!({
        "product": {
            "gtin": FIXTURE_GTIN,
            "sku": "TS-ORG-001",
            "name": "Organic Cotton T-Shirt",
            "description": "Crew-neck t-shirt in organic cotton jersey",
            "brand": "Nordwind",
            "category": "apparel",
            "batch": FIXTURE_LOT
        },
        "economicOperator": {
            "legalName": "Nordwind Textiles GmbH",
            "vatId": "DE123456789",
            "address": {
                "streetAddress": "Speicherstrasse 12",
                "addressLocality": "Hamburg",
                "addressCountry": "DE"
            },
            "contactPoint": {
                "email": "dpp@nordwind.example",
                "telephone": "+49 40 555 0199"
            }
        },
        "materialComposition": [
            {
                "material": "Cotton",
                "materialType": "natural fiber",
                "percentage": 100.0,
                "certifications": ["GOTS"],
                "origin": {
                    "country": "TR",
                    "region": "Aegean",
                    "supplier": "Aegean Organic Co-op"
                },
                "recycledContent": 0.0
            }
        ],
        "journey": [
            {
                "stage": "Ginning",
                "tier": 3,
                "facility": {
                    "name": "Eco Gin",
                    "id": "FAC-TR-0042",
                    "location": { "country": "TR", "region": "Aegean" }
                },
                "process": {
                    "type": "agriculture",
                    "startDate": "2025-03-01",
                    "endDate": "2025-04-15"
                },
                "certifications": [
                    {
                        "type": "GOTS",
                        "certificateNumber": "GOTS-2025-0099",
                        "validUntil": "2026-04-15",
                        "document": "https://certs.example/gots/2025-0099.pdf"
                    }
                ]
            }
        ],
        "usePhase": {
            "careInstructions": [
                { "icon": "wash-30", "description": "Machine wash at 30C" }
            ]
        },
        "endOfLife": {
            "recyclability": {
                "recyclable": true,
                "recyclabilityScore": 8.0,
                "process": "Mechanical fiber recycling"
            },
            "collectionScheme": {
                "available": true,
                "instructions": "Return to any brand store"
            }
        }
    })
}

/// Returns the typed fixture submission.
///
/// # Errors
///
/// Returns a message when the fixture JSON fails to deserialize.
pub fn fixture_submission() -> Result<PassportSubmission, String> {
    serde_json::from_value(submission_json()).map_err(|err| err.to_string())
}

/// Returns a fixture timestamp (2026-01-15T00:00:00Z).
#[must_use]
pub fn fixture_timestamp() -> Option<dpp_core::Timestamp> {
    dpp_core::Timestamp::from_unix_seconds(1_768_435_200)
}
