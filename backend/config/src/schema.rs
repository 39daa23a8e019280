//! Triton runtime configuration schema.
//!
//! Typed for serde YAML/JSON with camelCase keys. Every section has a
//! complete default, so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::defaults;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TritonConfig {
    pub backends: BackendsConfig,
    pub health: HealthConfig,
    pub cache: CacheConfig,
    pub routing: RoutingConfig,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
}

// ---------------------------------------------------------------------------
// Backends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendsConfig {
    pub remote: RemoteBackendConfig,
    pub local: LocalBackendConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteBackendConfig {
    pub base_url: String,
    /// Bearer token sent on every completion request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for RemoteBackendConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::REMOTE_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: defaults::REMOTE_TIMEOUT_SECS,
            max_tokens: defaults::REMOTE_MAX_TOKENS,
            temperature: defaults::REMOTE_TEMPERATURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalBackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_length: u32,
    pub temperature: f32,
}

impl Default for LocalBackendConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::LOCAL_BASE_URL.to_string(),
            timeout_secs: defaults::LOCAL_TIMEOUT_SECS,
            max_length: defaults::LOCAL_MAX_LENGTH,
            temperature: defaults::LOCAL_TEMPERATURE,
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthConfig {
    pub interval_secs: u64,
    pub probe_timeout_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::HEALTH_INTERVAL_SECS,
            probe_timeout_secs: defaults::HEALTH_PROBE_TIMEOUT_SECS,
        }
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_secs: u64,
    /// Durable store. When unset or unreachable the in-memory store is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_url: Option<String>,
    pub prefix: String,
    pub sweep_interval_secs: u64,
    pub connect_timeout_secs: u64,
    /// Deadline for each Redis command; a late reply counts as a miss.
    pub command_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: defaults::CACHE_TTL_SECS,
            redis_url: None,
            prefix: defaults::CACHE_PREFIX.to_string(),
            sweep_interval_secs: defaults::CACHE_SWEEP_INTERVAL_SECS,
            connect_timeout_secs: defaults::CACHE_CONNECT_TIMEOUT_SECS,
            command_timeout_ms: defaults::CACHE_COMMAND_TIMEOUT_MS,
        }
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutingConfig {
    /// Preference for categories missing from `tasks`.
    pub default_backend: String,
    /// Task category label → "remote" | "local" | "both".
    pub tasks: BTreeMap<String, String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_backend: "local".to_string(),
            tasks: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging / server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the rolling NDJSON log. Console only when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: defaults::SERVER_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let cfg: TritonConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, TritonConfig::default());
        assert_eq!(cfg.health.interval_secs, 60);
        assert!(cfg.cache.enabled);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r#"
backends:
  remote:
    baseUrl: https://inference.example.com
    apiKey: secret
cache:
  ttlSecs: 120
routing:
  tasks:
    weather-analysis: remote
"#;
        let cfg: TritonConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.backends.remote.base_url, "https://inference.example.com");
        assert_eq!(cfg.backends.remote.timeout_secs, defaults::REMOTE_TIMEOUT_SECS);
        assert_eq!(cfg.backends.local.base_url, defaults::LOCAL_BASE_URL);
        assert_eq!(cfg.cache.ttl_secs, 120);
        assert_eq!(cfg.cache.prefix, "triton");
        assert_eq!(cfg.routing.tasks["weather-analysis"], "remote");
    }
}
