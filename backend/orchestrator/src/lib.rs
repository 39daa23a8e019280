//! `triton-orchestrator`: routes maritime queries across the remote and
//! local backends with caching, consensus fan-out, and offline fallback.

pub mod fallback;
pub mod offline;
pub mod orchestrator;
pub mod runtime;
pub mod stats;

pub use offline::{offline_response, DEFAULT_OFFLINE_RESPONSE};
pub use orchestrator::QueryOrchestrator;
pub use runtime::{check_backends, TritonRuntime};
pub use stats::{QueryStats, StatsSnapshot};
