// crates/dpp-store-sqlite/src/lib.rs
// ============================================================================
// Module: DPP SQLite Store
// Description: Durable PassportStore implementation backed by SQLite.
// Purpose: Persist passport snapshots keyed by the (GTIN, lot) pair.
// Dependencies: dpp-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Durable [`dpp_core::PassportStore`] backed by `SQLite`. Snapshots are
//! stored as JSON keyed by the (GTIN, lot) pair with a uniqueness constraint
//! enforcing one passport per pair. Loads fail closed on corrupt or
//! mismatched payloads.

mod store;

pub use store::MAX_SNAPSHOT_BYTES;
pub use store::SqliteJournalMode;
pub use store::SqlitePassportStore;
pub use store::SqlitePassportStoreConfig;
pub use store::SqlitePassportStoreError;
pub use store::SqliteSyncMode;
