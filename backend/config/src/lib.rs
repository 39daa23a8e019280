//! `triton-config`: Triton runtime configuration.
//!
//! Provides:
//! - Typed config schema (backends, health, cache, routing, logging, server)
//! - YAML read/write with backup rotation
//! - `${ENV_VAR}` substitution and `TRITON_*` overrides
//! - Default routing table and normalization
//! - Validation with field paths
//! - Redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, load_raw, write_config};
pub use redact::redact;
pub use schema::{
    BackendsConfig, CacheConfig, HealthConfig, LocalBackendConfig, LoggingConfig,
    RemoteBackendConfig, RoutingConfig, ServerConfig, TritonConfig,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Load, substitute env vars, apply defaults and overrides, then validate.
///
/// This is the main entry point for loading a config at runtime. Warnings are
/// logged; any validation error fails the load.
pub async fn load_and_prepare(path: &Path) -> Result<TritonConfig> {
    let value = load_raw(path).await?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: TritonConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;
    let config = apply_env_overrides(apply_all_defaults(config));

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("config at {} has {} error(s)", path.display(), report.errors.len());
    }

    Ok(config)
}
