use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the two AI completion services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// High-capability remote model.
    Remote,
    /// Lightweight local model.
    Local,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Remote => "remote",
            Backend::Local => "local",
        }
    }

    /// The other backend.
    pub fn opposite(&self) -> Backend {
        match self {
            Backend::Remote => Backend::Local,
            Backend::Local => Backend::Remote,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Routing-table preference for a task category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredBackend {
    Remote,
    Local,
    /// Fan out to both backends (consensus query).
    Both,
}

impl fmt::Display for PreferredBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PreferredBackend::Remote => "remote",
            PreferredBackend::Local => "local",
            PreferredBackend::Both => "both",
        })
    }
}

impl FromStr for PreferredBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(PreferredBackend::Remote),
            "local" => Ok(PreferredBackend::Local),
            "both" => Ok(PreferredBackend::Both),
            other => Err(format!("unknown backend preference '{other}'")),
        }
    }
}

/// A preference resolved against current availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Remote,
    Local,
    Both,
    /// Nothing reachable; serve a canned response.
    Offline,
}

impl Target {
    /// The single backend this target dispatches to, if any.
    pub fn backend(&self) -> Option<Backend> {
        match self {
            Target::Remote => Some(Backend::Remote),
            Target::Local => Some(Backend::Local),
            Target::Both | Target::Offline => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::Remote => "remote",
            Target::Local => "local",
            Target::Both => "both",
            Target::Offline => "offline",
        })
    }
}

// ---------------------------------------------------------------------------
// Task category
// ---------------------------------------------------------------------------

/// Label used purely as a routing key.
///
/// Unrecognized labels are preserved in `Other` so they still route (to the
/// table default) and still get the generic offline message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskCategory {
    RouteOptimization,
    WeatherAnalysis,
    EtaPrediction,
    VesselTracking,
    #[default]
    BasicQuery,
    PortOperations,
    CriticalSafety,
    Other(String),
}

impl TaskCategory {
    /// Every named category, in display order.
    pub const KNOWN: [TaskCategory; 7] = [
        TaskCategory::RouteOptimization,
        TaskCategory::WeatherAnalysis,
        TaskCategory::EtaPrediction,
        TaskCategory::VesselTracking,
        TaskCategory::BasicQuery,
        TaskCategory::PortOperations,
        TaskCategory::CriticalSafety,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TaskCategory::RouteOptimization => "route-optimization",
            TaskCategory::WeatherAnalysis => "weather-analysis",
            TaskCategory::EtaPrediction => "eta-prediction",
            TaskCategory::VesselTracking => "vessel-tracking",
            TaskCategory::BasicQuery => "basic-query",
            TaskCategory::PortOperations => "port-operations",
            TaskCategory::CriticalSafety => "critical-safety",
            TaskCategory::Other(label) => label,
        }
    }
}

impl From<&str> for TaskCategory {
    fn from(label: &str) -> Self {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "route-optimization" => TaskCategory::RouteOptimization,
            "weather-analysis" => TaskCategory::WeatherAnalysis,
            "eta-prediction" => TaskCategory::EtaPrediction,
            "vessel-tracking" => TaskCategory::VesselTracking,
            "basic-query" | "" => TaskCategory::BasicQuery,
            "port-operations" => TaskCategory::PortOperations,
            "critical-safety" => TaskCategory::CriticalSafety,
            _ => TaskCategory::Other(normalized),
        }
    }
}

impl From<String> for TaskCategory {
    fn from(label: String) -> Self {
        TaskCategory::from(label.as_str())
    }
}

impl From<TaskCategory> for String {
    fn from(task: TaskCategory) -> Self {
        task.as_str().to_string()
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Last observed liveness of both backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendAvailability {
    pub remote_available: bool,
    pub local_available: bool,
    /// `None` until the first health check completes ("loading").
    pub last_checked: Option<DateTime<Utc>>,
}

impl BackendAvailability {
    pub fn new(remote_available: bool, local_available: bool) -> Self {
        Self {
            remote_available,
            local_available,
            last_checked: Some(Utc::now()),
        }
    }

    pub fn is_available(&self, backend: Backend) -> bool {
        match backend {
            Backend::Remote => self.remote_available,
            Backend::Local => self.local_available,
        }
    }

    /// True iff both backends are unavailable.
    pub fn is_offline(&self) -> bool {
        !self.remote_available && !self.local_available
    }
}

// ---------------------------------------------------------------------------
// Query result
// ---------------------------------------------------------------------------

/// The path a result actually took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuerySource {
    Cache,
    Remote,
    Local,
    RemoteFallback,
    LocalFallback,
    Offline,
    OfflineFallback,
    ConsensusRemote,
}

impl QuerySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuerySource::Cache => "cache",
            QuerySource::Remote => "remote",
            QuerySource::Local => "local",
            QuerySource::RemoteFallback => "remote-fallback",
            QuerySource::LocalFallback => "local-fallback",
            QuerySource::Offline => "offline",
            QuerySource::OfflineFallback => "offline-fallback",
            QuerySource::ConsensusRemote => "consensus-remote",
        }
    }

    pub fn direct(backend: Backend) -> Self {
        match backend {
            Backend::Remote => QuerySource::Remote,
            Backend::Local => QuerySource::Local,
        }
    }

    pub fn fallback(backend: Backend) -> Self {
        match backend {
            Backend::Remote => QuerySource::RemoteFallback,
            Backend::Local => QuerySource::LocalFallback,
        }
    }

    /// Whether the text was served from the canned offline table.
    pub fn is_offline(&self) -> bool {
        matches!(self, QuerySource::Offline | QuerySource::OfflineFallback)
    }
}

impl fmt::Display for QuerySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one orchestrated query. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub result: String,
    pub source: QuerySource,
    pub processing_time_ms: u64,
    /// Cache key and correlation id.
    #[serde(rename = "queryId")]
    pub fingerprint: String,
    /// Set when the result came out of the fallback chain.
    #[serde(default)]
    pub fallback: bool,
}
