// crates/dpp-server/src/main.rs
// ============================================================================
// Module: Server Binary
// Description: Entry point wiring config, store, and router.
// Purpose: Load configuration, select the store backend, and serve until
// interrupted.
// Dependencies: axum, dpp-config, dpp-core, dpp-server, dpp-store-sqlite,
// tokio
// ============================================================================

//! ## Overview
//! Binary entry point. Configuration comes from an optional TOML path given
//! as the first argument (or the `DPP_CONFIG` environment variable);
//! defaults bind to loopback with the in-memory store.

use std::path::PathBuf;
use std::sync::Arc;

use dpp_config::DppConfig;
use dpp_config::StoreBackend;
use dpp_core::InMemoryPassportStore;
use dpp_server::NoopMetrics;
use dpp_server::build_router;
use dpp_server::build_state;
use dpp_server::server::DynPassportStore;
use dpp_store_sqlite::SqlitePassportStore;
use dpp_store_sqlite::SqlitePassportStoreConfig;

/// Boxed error for startup failures.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Resolves the config path from argv or the environment.
fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("DPP_CONFIG").map(PathBuf::from))
}

/// Builds the configured store backend.
fn build_store(config: &DppConfig) -> Result<DynPassportStore, BoxError> {
    match config.store.backend {
        StoreBackend::Memory => Ok(Box::new(InMemoryPassportStore::new())),
        StoreBackend::Sqlite => {
            let path = config
                .store
                .path
                .clone()
                .ok_or("store.path is required for the sqlite backend")?;
            let store = SqlitePassportStore::new(&SqlitePassportStoreConfig::new(path))?;
            Ok(Box::new(store))
        }
    }
}

/// Waits for an interrupt signal.
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Loads config, builds the store and router, and serves until interrupted.
#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = DppConfig::load(config_path().as_deref())?;
    let bind = config.bind_addr()?;
    let store = build_store(&config)?;
    let state = Arc::new(build_state(&config, store, Arc::new(NoopMetrics))?);
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
