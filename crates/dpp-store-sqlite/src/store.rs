// crates/dpp-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Passport Store
// Description: Durable PassportStore backed by SQLite WAL.
// Purpose: Persist passport snapshots keyed by the (GTIN, lot) pair.
// Dependencies: dpp-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`PassportStore`] using `SQLite`. Each
//! insert stores the full passport snapshot as JSON in a row keyed by the
//! (GTIN, lot) pair; a uniqueness constraint enforces one passport per pair.
//! Loads fail closed: a snapshot that does not deserialize, or whose embedded
//! identifiers disagree with the row key, is reported as corruption rather
//! than returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use dpp_core::DigitalProductPassport;
use dpp_core::Gtin;
use dpp_core::LotNumber;
use dpp_core::PassportStore;
use dpp_core::StoreError;
use dpp_core::StoreStats;
use rusqlite::Connection;
use rusqlite::ErrorCode;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum passport snapshot size accepted by the store.
pub const MAX_SNAPSHOT_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteJournalMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteJournalMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` passport store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqlitePassportStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteJournalMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqlitePassportStoreConfig {
    /// Returns a config with defaults for the given database path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            busy_timeout_ms: default_busy_timeout_ms(),
            journal_mode: SqliteJournalMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
///
/// # Invariants
/// - Error messages avoid embedding raw passport payloads.
#[derive(Debug, Error)]
pub enum SqlitePassportStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store corruption: undecodable or mismatched snapshot.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data or input.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// A passport already exists for the (GTIN, lot) pair.
    #[error("passport already exists for gtin {gtin} lot {lot}")]
    Conflict {
        /// Conflicting GTIN.
        gtin: Gtin,
        /// Conflicting lot.
        lot: LotNumber,
    },
}

impl From<SqlitePassportStoreError> for StoreError {
    fn from(error: SqlitePassportStoreError) -> Self {
        match error {
            SqlitePassportStoreError::Io(message) => Self::Io(message),
            SqlitePassportStoreError::Db(message)
            | SqlitePassportStoreError::VersionMismatch(message)
            | SqlitePassportStoreError::Invalid(message) => Self::Store(message),
            SqlitePassportStoreError::Corrupt(message) => Self::Corrupt(message),
            SqlitePassportStoreError::Conflict { gtin, lot } => Self::Conflict { gtin, lot },
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed passport store with WAL support.
///
/// # Invariants
/// - Each (GTIN, lot) pair maps to at most one stored snapshot.
/// - Connection access is serialized through a mutex.
#[derive(Clone)]
pub struct SqlitePassportStore {
    /// Shared connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqlitePassportStore {
    /// Opens an `SQLite`-backed passport store.
    ///
    /// # Errors
    ///
    /// Returns [`SqlitePassportStoreError`] when the database cannot be
    /// opened or initialized.
    pub fn new(config: &SqlitePassportStoreConfig) -> Result<Self, SqlitePassportStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let connection = open_connection(config)?;
        initialize_schema(&connection)?;
        Ok(Self { connection: Arc::new(Mutex::new(connection)) })
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, SqlitePassportStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqlitePassportStoreError::Db("sqlite mutex poisoned".to_string()))
    }

    /// Decodes a stored snapshot and checks it against its row key.
    fn decode_snapshot(
        gtin: &str,
        lot: &str,
        snapshot: &str,
    ) -> Result<DigitalProductPassport, SqlitePassportStoreError> {
        let passport: DigitalProductPassport = serde_json::from_str(snapshot).map_err(|err| {
            SqlitePassportStoreError::Corrupt(format!("snapshot for gtin {gtin} lot {lot}: {err}"))
        })?;
        if passport.product.gtin != gtin || passport.product.batch != lot {
            return Err(SqlitePassportStoreError::Corrupt(format!(
                "key/payload mismatch for gtin {gtin} lot {lot}"
            )));
        }
        Ok(passport)
    }

    /// Loads the passport for an exact (GTIN, lot) pair.
    fn find_pair(
        &self,
        gtin: &Gtin,
        lot: &LotNumber,
    ) -> Result<Option<DigitalProductPassport>, SqlitePassportStoreError> {
        let guard = self.lock()?;
        let row: Option<String> = guard
            .query_row(
                "SELECT snapshot FROM passports WHERE gtin = ?1 AND lot = ?2",
                params![gtin.as_str(), lot.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
        drop(guard);
        let Some(snapshot) = row else {
            return Ok(None);
        };
        Self::decode_snapshot(gtin.as_str(), lot.as_str(), &snapshot).map(Some)
    }

    /// Loads the first passport recorded for a GTIN, regardless of lot.
    fn find_first(
        &self,
        gtin: &Gtin,
    ) -> Result<Option<DigitalProductPassport>, SqlitePassportStoreError> {
        let guard = self.lock()?;
        let row: Option<(String, String)> = guard
            .query_row(
                "SELECT lot, snapshot FROM passports WHERE gtin = ?1 ORDER BY id ASC LIMIT 1",
                params![gtin.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
        drop(guard);
        let Some((lot, snapshot)) = row else {
            return Ok(None);
        };
        Self::decode_snapshot(gtin.as_str(), &lot, &snapshot).map(Some)
    }

    /// Persists a newly assembled passport snapshot.
    fn insert_snapshot(
        &self,
        passport: &DigitalProductPassport,
    ) -> Result<(), SqlitePassportStoreError> {
        let gtin = Gtin::parse(passport.product.gtin.clone())
            .map_err(|err| SqlitePassportStoreError::Invalid(err.to_string()))?;
        let lot = LotNumber::new(&passport.product.batch);
        let snapshot = serde_json::to_string(passport)
            .map_err(|err| SqlitePassportStoreError::Invalid(err.to_string()))?;
        if snapshot.len() > MAX_SNAPSHOT_BYTES {
            return Err(SqlitePassportStoreError::Invalid(format!(
                "snapshot exceeds size limit: {} bytes (max {MAX_SNAPSHOT_BYTES})",
                snapshot.len()
            )));
        }
        let created_unix_ms = passport.created_date.unix_seconds().saturating_mul(1_000);
        let guard = self.lock()?;
        let outcome = guard.execute(
            "INSERT INTO passports (gtin, lot, dpp_id, operator_vat, snapshot, created_unix_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                gtin.as_str(),
                lot.as_str(),
                passport.dpp_id.as_str(),
                passport.economic_operator.vat_id.as_str(),
                snapshot,
                created_unix_ms,
            ],
        );
        drop(guard);
        match outcome {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Err(SqlitePassportStoreError::Conflict { gtin, lot })
            }
            Err(err) => Err(SqlitePassportStoreError::Db(err.to_string())),
        }
    }

    /// Lists stored snapshots in insertion order, up to `limit`.
    fn list_snapshots(
        &self,
        limit: usize,
    ) -> Result<Vec<DigitalProductPassport>, SqlitePassportStoreError> {
        let limit = i64::try_from(limit)
            .map_err(|_| SqlitePassportStoreError::Invalid("limit too large".to_string()))?;
        let guard = self.lock()?;
        let mut stmt = guard
            .prepare("SELECT gtin, lot, snapshot FROM passports ORDER BY id ASC LIMIT ?1")
            .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
        let rows = stmt
            .query_map(params![limit], |row| {
                let gtin: String = row.get(0)?;
                let lot: String = row.get(1)?;
                let snapshot: String = row.get(2)?;
                Ok((gtin, lot, snapshot))
            })
            .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
        let mut results = Vec::new();
        for row in rows {
            let (gtin, lot, snapshot) =
                row.map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
            results.push(Self::decode_snapshot(&gtin, &lot, &snapshot)?);
        }
        drop(stmt);
        drop(guard);
        Ok(results)
    }

    /// Returns aggregate counts over stored snapshots.
    fn count_stats(&self) -> Result<StoreStats, SqlitePassportStoreError> {
        let guard = self.lock()?;
        let (passports, products, operators): (i64, i64, i64) = guard
            .query_row(
                "SELECT COUNT(*), COUNT(DISTINCT gtin), COUNT(DISTINCT operator_vat) \
                 FROM passports",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
        drop(guard);
        Ok(StoreStats {
            passports: u64::try_from(passports).unwrap_or_default(),
            products: u64::try_from(products).unwrap_or_default(),
            operators: u64::try_from(operators).unwrap_or_default(),
        })
    }

    /// Verifies the store can execute a simple SQL statement.
    fn check_connection(&self) -> Result<(), SqlitePassportStoreError> {
        let guard = self.lock()?;
        guard
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
        drop(guard);
        Ok(())
    }
}

impl PassportStore for SqlitePassportStore {
    fn find(
        &self,
        gtin: &Gtin,
        lot: &LotNumber,
    ) -> Result<Option<DigitalProductPassport>, StoreError> {
        self.find_pair(gtin, lot).map_err(StoreError::from)
    }

    fn find_latest(&self, gtin: &Gtin) -> Result<Option<DigitalProductPassport>, StoreError> {
        self.find_first(gtin).map_err(StoreError::from)
    }

    fn insert(&self, passport: &DigitalProductPassport) -> Result<(), StoreError> {
        self.insert_snapshot(passport).map_err(StoreError::from)
    }

    fn list(&self, limit: usize) -> Result<Vec<DigitalProductPassport>, StoreError> {
        self.list_snapshots(limit).map_err(StoreError::from)
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        self.count_stats().map_err(StoreError::from)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.check_connection().map_err(StoreError::from)
    }
}

// ============================================================================
// SECTION: Initialization
// ============================================================================

/// Rejects paths that exceed filesystem limits or point at directories.
fn validate_store_path(path: &Path) -> Result<(), SqlitePassportStoreError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqlitePassportStoreError::Invalid("store path exceeds max length".to_string()));
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqlitePassportStoreError::Invalid(
                "store path component too long".to_string(),
            ));
        }
    }
    if path.is_dir() {
        return Err(SqlitePassportStoreError::Invalid(
            "store path must be a file path, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Creates the parent directory for the database file when missing.
fn ensure_parent_dir(path: &Path) -> Result<(), SqlitePassportStoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .map_err(|err| SqlitePassportStoreError::Io(err.to_string()))?;
    }
    Ok(())
}

/// Opens a connection with the configured pragmas applied.
fn open_connection(
    config: &SqlitePassportStoreConfig,
) -> Result<Connection, SqlitePassportStoreError> {
    let connection = Connection::open(&config.path)
        .map_err(|err| SqlitePassportStoreError::Io(err.to_string()))?;
    let busy_timeout_ms =
        i64::try_from(config.busy_timeout_ms).unwrap_or(i64::MAX);
    connection
        .pragma_update(None, "busy_timeout", busy_timeout_ms)
        .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
    connection
        .pragma_update(None, "journal_mode", config.journal_mode.pragma_value())
        .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
    connection
        .pragma_update(None, "synchronous", config.sync_mode.pragma_value())
        .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
    connection
        .pragma_update(None, "foreign_keys", "on")
        .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
    Ok(connection)
}

/// Creates tables and verifies the stored schema version.
fn initialize_schema(connection: &Connection) -> Result<(), SqlitePassportStoreError> {
    connection
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS store_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS passports (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                gtin TEXT NOT NULL,
                lot TEXT NOT NULL,
                dpp_id TEXT NOT NULL,
                operator_vat TEXT NOT NULL,
                snapshot TEXT NOT NULL,
                created_unix_ms INTEGER NOT NULL,
                UNIQUE (gtin, lot)
            );
            CREATE INDEX IF NOT EXISTS idx_passports_gtin ON passports (gtin);",
        )
        .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
    let stored: Option<String> = connection
        .query_row(
            "SELECT value FROM store_meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
    match stored {
        Some(value) => {
            let version: i64 = value.parse().map_err(|_| {
                SqlitePassportStoreError::Corrupt(format!("unreadable schema version: {value}"))
            })?;
            if version != SCHEMA_VERSION {
                return Err(SqlitePassportStoreError::VersionMismatch(format!(
                    "found {version}, expected {SCHEMA_VERSION}"
                )));
            }
        }
        None => {
            connection
                .execute(
                    "INSERT INTO store_meta (key, value) VALUES ('schema_version', ?1)",
                    params![SCHEMA_VERSION.to_string()],
                )
                .map_err(|err| SqlitePassportStoreError::Db(err.to_string()))?;
        }
    }
    Ok(())
}
