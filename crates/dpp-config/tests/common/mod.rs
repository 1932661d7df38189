// crates/dpp-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Helpers
// Description: Shared builders for configuration tests.
// Purpose: Keep the per-concern suites focused on their own constraints.
// ============================================================================

//! Shared config test helpers.

#![allow(dead_code, reason = "Shared test helpers may be unused in some suites.")]

use dpp_config::ConfigError;
use dpp_config::DppConfig;

/// Returns a config that passes validation with every table explicit.
pub fn minimal_config() -> Result<DppConfig, ConfigError> {
    let text = r#"
        [viewer]
        base_url = "https://viewer.example"

        [server]
        bind = "127.0.0.1:8080"

        [store]
        backend = "memory"
    "#;
    DppConfig::from_toml_str(text)
}

/// Asserts that a validation result fails with a message containing `needle`.
pub fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}
