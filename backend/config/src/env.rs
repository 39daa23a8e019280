//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references inside string values, resolved at load time
//!   (uppercase names only; `$${VAR}` escapes to a literal `${VAR}`).
//! - Well-known `TRITON_*` variables that override individual fields after
//!   the file is parsed.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::schema::TritonConfig;

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env var pattern"));

/// Error returned for a referenced variable that is unset or empty.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references across a config value tree using the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute `${VAR}` references using the given map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    Ok(substitute_value(value, env, "")?)
}

fn substitute_value(
    value: &Value,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<Value, MissingEnvVarError> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.insert(k.clone(), substitute_value(v, env, &child)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(
    s: &str,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<String, MissingEnvVarError> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let replaced = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let whole = &caps[0];
        let name = &caps[1];
        if whole.starts_with("$$") {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    match missing {
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

/// Apply `TRITON_*` overrides from the process environment.
pub fn apply_env_overrides(config: TritonConfig) -> TritonConfig {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply `TRITON_*` overrides from the given map.
pub fn apply_env_overrides_with(
    mut config: TritonConfig,
    env: &HashMap<String, String>,
) -> TritonConfig {
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(url) = get("TRITON_REMOTE_URL") {
        debug!(var = "TRITON_REMOTE_URL", "Config override from environment");
        config.backends.remote.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(key) = get("TRITON_REMOTE_API_KEY") {
        debug!(var = "TRITON_REMOTE_API_KEY", "Config override from environment");
        config.backends.remote.api_key = Some(key.to_string());
    }
    if let Some(url) = get("TRITON_LOCAL_URL") {
        debug!(var = "TRITON_LOCAL_URL", "Config override from environment");
        config.backends.local.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(url) = get("TRITON_REDIS_URL") {
        debug!(var = "TRITON_REDIS_URL", "Config override from environment");
        config.cache.redis_url = Some(url.to_string());
    }
    if let Some(flag) = get("TRITON_CACHE_ENABLED") {
        config.cache.enabled = matches!(flag.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
    }
    if let Some(port) = get("TRITON_PORT").and_then(|p| p.parse().ok()) {
        config.server.port = port;
    }

    config
}
