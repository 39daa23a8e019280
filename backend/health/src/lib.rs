//! `triton-health`: backend liveness tracking.
//!
//! The monitor is the single writer of [`AvailabilityState`]; routing and the
//! fallback chain read snapshots of it. Staleness of up to one check interval
//! is expected.

pub mod availability;
pub mod monitor;
pub mod probe;
pub mod transitions;

pub use availability::AvailabilityState;
pub use monitor::{HealthMonitor, MonitorHandle};
pub use probe::{HealthProbe, HttpHealthProbe};
pub use transitions::{diff, Transition};
