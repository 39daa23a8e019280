//! Config defaults: constants plus the post-load defaulting pass.

use crate::schema::TritonConfig;

pub const REMOTE_BASE_URL: &str = "http://localhost:8001";
pub const REMOTE_TIMEOUT_SECS: u64 = 30;
pub const REMOTE_MAX_TOKENS: u32 = 2048;
pub const REMOTE_TEMPERATURE: f32 = 0.7;

pub const LOCAL_BASE_URL: &str = "http://localhost:8002";
pub const LOCAL_TIMEOUT_SECS: u64 = 15;
pub const LOCAL_MAX_LENGTH: u32 = 1024;
pub const LOCAL_TEMPERATURE: f32 = 0.5;

pub const HEALTH_INTERVAL_SECS: u64 = 60;
pub const HEALTH_PROBE_TIMEOUT_SECS: u64 = 3;

pub const CACHE_TTL_SECS: u64 = 3600;
pub const CACHE_PREFIX: &str = "triton";
pub const CACHE_SWEEP_INTERVAL_SECS: u64 = 60;
pub const CACHE_CONNECT_TIMEOUT_SECS: u64 = 2;
pub const CACHE_COMMAND_TIMEOUT_MS: u64 = 500;

pub const SERVER_PORT: u16 = 8080;

/// Built-in task routing, used when the config names no tasks.
pub const DEFAULT_ROUTES: &[(&str, &str)] = &[
    ("route-optimization", "remote"),
    ("weather-analysis", "remote"),
    ("eta-prediction", "local"),
    ("vessel-tracking", "local"),
    ("basic-query", "local"),
    ("port-operations", "local"),
    ("critical-safety", "both"),
];

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: TritonConfig) -> TritonConfig {
    let config = apply_routing_defaults(config);
    let config = apply_backend_defaults(config);
    apply_cache_defaults(config)
}

/// Fill the routing table when the file leaves it empty.
fn apply_routing_defaults(mut config: TritonConfig) -> TritonConfig {
    let routing = &mut config.routing;
    if routing.tasks.is_empty() {
        routing.tasks = DEFAULT_ROUTES
            .iter()
            .map(|(task, pref)| (task.to_string(), pref.to_string()))
            .collect();
    }
    if routing.default_backend.trim().is_empty() {
        routing.default_backend = "local".to_string();
    }
    config
}

/// Strip trailing slashes so endpoint paths join cleanly.
fn apply_backend_defaults(mut config: TritonConfig) -> TritonConfig {
    let remote = &mut config.backends.remote;
    remote.base_url = remote.base_url.trim_end_matches('/').to_string();
    if remote.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        remote.api_key = None;
    }

    let local = &mut config.backends.local;
    local.base_url = local.base_url.trim_end_matches('/').to_string();
    config
}

fn apply_cache_defaults(mut config: TritonConfig) -> TritonConfig {
    let cache = &mut config.cache;
    if cache.prefix.trim().is_empty() {
        cache.prefix = CACHE_PREFIX.to_string();
    }
    if cache.redis_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
        cache.redis_url = None;
    }
    config
}
