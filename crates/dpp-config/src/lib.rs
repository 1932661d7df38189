// crates/dpp-config/src/lib.rs
// ============================================================================
// Module: DPP Configuration
// Description: Canonical configuration model for the passport services.
// Purpose: Centralize viewer, server, and store settings with fail-closed
// validation so deployment mistakes surface at startup, not at request time.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//!
//! Configuration for the Digital Product Passport services. The model is a
//! plain TOML document with three tables:
//!
//! - `[viewer]`: the public viewer base URL that GTIN resolution targets.
//! - `[server]`: bind address, optional bearer-token auth, body limits.
//! - `[store]`: passport storage backend selection.
//!
//! Every field has a conservative default so `DppConfig::load(None)` yields a
//! working local setup. Validation fails closed: a non-loopback bind without
//! auth tokens is rejected rather than silently exposed.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Maximum accepted length of a config file path.
const MAX_PATH_LEN: usize = 4096;

/// Maximum accepted length of a single path component.
const MAX_PATH_COMPONENT_LEN: usize = 255;

/// Maximum accepted config file size in bytes.
const MAX_CONFIG_BYTES: u64 = 1_048_576;

/// Default server bind address.
const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default viewer base URL for local development.
const DEFAULT_VIEWER_BASE: &str = "http://localhost:3000";

/// Default request body limit in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;

/// Smallest request body limit considered usable.
const MIN_MAX_BODY_BYTES: usize = 1024;

// =========================================================================
// SECTION: Errors
// =========================================================================

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config path exceeded the maximum length.
    #[error("config path exceeds max length")]
    PathTooLong,
    /// A single path component exceeded the maximum length.
    #[error("config path component too long")]
    PathComponentTooLong,
    /// Config file exceeded the size limit.
    #[error("config file exceeds size limit")]
    FileTooLarge,
    /// Config file was not valid UTF-8.
    #[error("config file must be utf-8")]
    NotUtf8,
    /// Filesystem error while reading the config file.
    #[error("config read failed: {0}")]
    Io(String),
    /// TOML syntax or shape error.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// Semantic validation failure.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// =========================================================================
// SECTION: Model
// =========================================================================

/// Root configuration for the passport services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DppConfig {
    /// Public viewer settings used by GTIN resolution.
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Passport storage settings.
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for DppConfig {
    fn default() -> Self {
        Self {
            viewer: ViewerConfig::default(),
            server: ServerConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

/// Public viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    /// Absolute http(s) base URL of the consumer-facing viewer.
    #[serde(default = "default_viewer_base")]
    pub base_url: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self { base_url: default_viewer_base() }
    }
}

/// Default viewer base URL.
fn default_viewer_base() -> String {
    DEFAULT_VIEWER_BASE.to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Optional bearer-token auth policy. Required for non-loopback binds.
    #[serde(default)]
    pub auth: Option<ServerAuthConfig>,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), auth: None, max_body_bytes: default_max_body_bytes() }
    }
}

/// Default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default request body limit.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Bearer-token auth policy for submission endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerAuthConfig {
    /// Accepted bearer tokens. Must be non-empty when auth is configured.
    #[serde(default)]
    pub bearer_tokens: Vec<String>,
}

/// Passport storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Volatile in-process store. Suitable for tests and demos.
    Memory,
    /// Durable SQLite-backed store. Requires `store.path`.
    Sqlite,
}

/// Passport storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Selected backend.
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,
    /// Database file path. Required for `sqlite`, rejected for `memory`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { backend: default_backend(), path: None }
    }
}

/// Default storage backend.
const fn default_backend() -> StoreBackend {
    StoreBackend::Memory
}

// =========================================================================
// SECTION: Loading
// =========================================================================

impl DppConfig {
    /// Loads configuration from an optional TOML file.
    ///
    /// `None` yields the validated defaults. Paths are guarded against
    /// oversized inputs before any read happens.
    ///
    /// # Errors
    /// Returns [`ConfigError`] on read, parse, or validation failure.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        };
        check_path(path)?;
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if metadata.len() > MAX_CONFIG_BYTES {
            return Err(ConfigError::FileTooLarge);
        }
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8)?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all semantic constraints.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_viewer(&self.viewer)?;
        validate_server(&self.server)?;
        validate_store(&self.store)?;
        Ok(())
    }

    /// Returns the validated viewer base URL.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the configured base URL does not
    /// satisfy the viewer constraints.
    pub fn viewer_base(&self) -> Result<Url, ConfigError> {
        validate_viewer(&self.viewer)?;
        Url::parse(&self.viewer.base_url)
            .map_err(|_| ConfigError::Invalid("viewer.base_url must be an absolute url".to_string()))
    }

    /// Returns the validated server bind address.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the bind string is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind(&self.server.bind)
    }
}

/// Rejects paths that exceed the accepted size bounds.
fn check_path(path: &Path) -> Result<(), ConfigError> {
    let raw = path.as_os_str();
    if raw.len() > MAX_PATH_LEN {
        return Err(ConfigError::PathTooLong);
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LEN {
            return Err(ConfigError::PathComponentTooLong);
        }
    }
    Ok(())
}

// =========================================================================
// SECTION: Validation
// =========================================================================

/// Validates viewer constraints.
fn validate_viewer(viewer: &ViewerConfig) -> Result<(), ConfigError> {
    let parsed = Url::parse(&viewer.base_url)
        .map_err(|_| ConfigError::Invalid("viewer.base_url must be an absolute url".to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::Invalid("viewer.base_url must use http or https".to_string()));
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::Invalid("viewer.base_url must carry a host".to_string()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ConfigError::Invalid(
            "viewer.base_url must not carry a query or fragment".to_string(),
        ));
    }
    Ok(())
}

/// Validates server constraints, including the fail-closed exposure rule.
fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    let bind = parse_bind(&server.bind)?;
    if let Some(auth) = &server.auth {
        if auth.bearer_tokens.is_empty() {
            return Err(ConfigError::Invalid(
                "auth.bearer_tokens must be non-empty when auth is configured".to_string(),
            ));
        }
        if auth.bearer_tokens.iter().any(|token| token.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "auth.bearer_tokens must not contain blank tokens".to_string(),
            ));
        }
    } else if !bind.ip().is_loopback() {
        return Err(ConfigError::Invalid(
            "non-loopback bind disallowed without auth tokens".to_string(),
        ));
    }
    if server.max_body_bytes < MIN_MAX_BODY_BYTES {
        return Err(ConfigError::Invalid(format!(
            "server.max_body_bytes must be at least {MIN_MAX_BODY_BYTES}"
        )));
    }
    Ok(())
}

/// Validates store constraints.
fn validate_store(store: &StoreConfig) -> Result<(), ConfigError> {
    match store.backend {
        StoreBackend::Sqlite => {
            let path = store
                .path
                .as_ref()
                .ok_or_else(|| {
                    ConfigError::Invalid(
                        "store.path is required for the sqlite backend".to_string(),
                    )
                })?;
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("store.path must be non-empty".to_string()));
            }
        }
        StoreBackend::Memory => {
            if store.path.is_some() {
                return Err(ConfigError::Invalid(
                    "store.path is only valid for the sqlite backend".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Parses the bind string into a socket address.
fn parse_bind(bind: &str) -> Result<SocketAddr, ConfigError> {
    bind.parse()
        .map_err(|_| ConfigError::Invalid("server.bind must be a host:port socket address".to_string()))
}
