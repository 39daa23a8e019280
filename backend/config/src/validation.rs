//! Config validation with field paths.

use crate::schema::TritonConfig;
use thiserror::Error;
use triton_core::PreferredBackend;

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return every error and warning found.
pub fn validate(config: &TritonConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_backends(config, &mut report);
    validate_health(config, &mut report);
    validate_cache(config, &mut report);
    validate_routing(config, &mut report);
    report
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn validate_backends(config: &TritonConfig, report: &mut ValidationReport) {
    let remote = &config.backends.remote;
    if !is_http_url(&remote.base_url) {
        report.error("backends.remote.baseUrl", "Must be an http:// or https:// URL");
    }
    if remote.timeout_secs == 0 {
        report.error("backends.remote.timeoutSecs", "timeoutSecs must be > 0");
    }
    if !(0.0..=2.0).contains(&remote.temperature) {
        report.error("backends.remote.temperature", "temperature must be within [0, 2]");
    }
    if remote.api_key.is_none() {
        report.warn(
            "backends.remote.apiKey",
            "No API key configured; the remote backend may reject requests",
        );
    }

    let local = &config.backends.local;
    if !is_http_url(&local.base_url) {
        report.error("backends.local.baseUrl", "Must be an http:// or https:// URL");
    }
    if local.timeout_secs == 0 {
        report.error("backends.local.timeoutSecs", "timeoutSecs must be > 0");
    }
    if !(0.0..=2.0).contains(&local.temperature) {
        report.error("backends.local.temperature", "temperature must be within [0, 2]");
    }
}

fn validate_health(config: &TritonConfig, report: &mut ValidationReport) {
    let health = &config.health;
    if health.interval_secs == 0 {
        report.error("health.intervalSecs", "intervalSecs must be > 0");
    }
    if health.probe_timeout_secs == 0 {
        report.error("health.probeTimeoutSecs", "probeTimeoutSecs must be > 0");
    }
    if health.probe_timeout_secs >= health.interval_secs && health.interval_secs > 0 {
        report.warn(
            "health.probeTimeoutSecs",
            "Probe timeout is not shorter than the check interval; checks may overlap",
        );
    }
}

fn validate_cache(config: &TritonConfig, report: &mut ValidationReport) {
    let cache = &config.cache;
    if !cache.enabled {
        return;
    }
    if cache.ttl_secs == 0 {
        report.warn("cache.ttlSecs", "ttlSecs is 0; entries never expire");
    }
    if cache.sweep_interval_secs == 0 {
        report.error("cache.sweepIntervalSecs", "sweepIntervalSecs must be > 0");
    }
    if cache.redis_url.is_some() && cache.command_timeout_ms == 0 {
        report.error("cache.commandTimeoutMs", "commandTimeoutMs must be > 0");
    }
    if let Some(url) = &cache.redis_url {
        if !(url.starts_with("redis://") || url.starts_with("rediss://")) {
            report.error("cache.redisUrl", "Must be a redis:// or rediss:// URL");
        }
    }
}

fn validate_routing(config: &TritonConfig, report: &mut ValidationReport) {
    let routing = &config.routing;
    if routing.default_backend.parse::<PreferredBackend>().is_err() {
        report.error(
            "routing.defaultBackend",
            format!("Unknown backend '{}'. Use 'remote', 'local', or 'both'", routing.default_backend),
        );
    }
    for (task, pref) in &routing.tasks {
        if task.trim().is_empty() {
            report.error("routing.tasks", "Task category cannot be empty");
        }
        if pref.parse::<PreferredBackend>().is_err() {
            report.error(
                format!("routing.tasks.{task}"),
                format!("Unknown backend '{pref}'. Use 'remote', 'local', or 'both'"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_with_api_key_warning() {
        let report = validate(&TritonConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.iter().any(|w| w.path == "backends.remote.apiKey"));
    }

    #[test]
    fn unknown_routing_backend_is_error() {
        let mut cfg = TritonConfig::default();
        cfg.routing.tasks.insert("weather-analysis".into(), "satellite".into());
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "routing.tasks.weather-analysis");
    }

    #[test]
    fn zero_timeouts_and_bad_urls_are_errors() {
        let mut cfg = TritonConfig::default();
        cfg.backends.local.base_url = "localhost:8002".into();
        cfg.backends.remote.timeout_secs = 0;
        cfg.health.interval_secs = 0;
        let report = validate(&cfg);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"backends.local.baseUrl"));
        assert!(paths.contains(&"backends.remote.timeoutSecs"));
        assert!(paths.contains(&"health.intervalSecs"));
    }

    #[test]
    fn redis_without_command_deadline_is_error() {
        let mut cfg = TritonConfig::default();
        cfg.cache.redis_url = Some("redis://127.0.0.1:6379".into());
        cfg.cache.command_timeout_ms = 0;
        let report = validate(&cfg);
        assert!(report.errors.iter().any(|e| e.path == "cache.commandTimeoutMs"));
    }

    #[test]
    fn disabled_cache_skips_cache_checks() {
        let mut cfg = TritonConfig::default();
        cfg.cache.enabled = false;
        cfg.cache.redis_url = Some("http://not-redis".into());
        assert!(validate(&cfg).is_valid());
    }
}
