//! Backend Health Monitor
//!
//! Probes both backends once at start and then on a fixed interval, writes
//! the shared availability snapshot, and logs only on edges.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use triton_config::{BackendsConfig, HealthConfig};
use triton_core::BackendAvailability;

use crate::availability::AvailabilityState;
use crate::probe::{HealthProbe, HttpHealthProbe};
use crate::transitions::{diff, Transition};

pub struct HealthMonitor {
    state: AvailabilityState,
    remote: Arc<dyn HealthProbe>,
    local: Arc<dyn HealthProbe>,
    probe_timeout: Duration,
    interval: Duration,
}

impl HealthMonitor {
    pub fn new(
        state: AvailabilityState,
        remote: Arc<dyn HealthProbe>,
        local: Arc<dyn HealthProbe>,
        probe_timeout: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            state,
            remote,
            local,
            probe_timeout,
            interval,
        }
    }

    /// HTTP probes against both configured backends.
    pub fn from_config(
        state: AvailabilityState,
        health: &HealthConfig,
        backends: &BackendsConfig,
    ) -> Self {
        let probe_timeout = Duration::from_secs(health.probe_timeout_secs);
        Self::new(
            state,
            Arc::new(HttpHealthProbe::new(&backends.remote.base_url, probe_timeout)),
            Arc::new(HttpHealthProbe::new(&backends.local.base_url, probe_timeout)),
            probe_timeout,
            Duration::from_secs(health.interval_secs),
        )
    }

    /// Probe both backends concurrently and publish the result.
    ///
    /// A probe that hangs past the probe timeout counts as down.
    pub async fn check_status(&self) -> BackendAvailability {
        let (remote, local) = futures::join!(
            tokio::time::timeout(self.probe_timeout, self.remote.probe()),
            tokio::time::timeout(self.probe_timeout, self.local.probe()),
        );
        let next = BackendAvailability {
            remote_available: remote.unwrap_or(false),
            local_available: local.unwrap_or(false),
            last_checked: Some(Utc::now()),
        };

        let prev = self.state.replace(next).await;
        report(&diff(&prev, &next));
        debug!(
            remote = next.remote_available,
            local = next.local_available,
            "Health check complete"
        );
        next
    }

    /// Run the first check, then keep checking every interval in the background.
    pub async fn start(self: Arc<Self>) -> MonitorHandle {
        self.check_status().await;

        let monitor = self.clone();
        let task = tokio::spawn(async move {
            let period = monitor.interval;
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                monitor.check_status().await;
            }
        });

        info!(interval_secs = self.interval.as_secs(), "Health monitor started");
        MonitorHandle { task }
    }
}

fn report(transitions: &[Transition]) {
    for t in transitions {
        match t {
            Transition::BackendDown(backend) => {
                warn!(%backend, "Backend became unavailable")
            }
            Transition::BackendUp(backend) => {
                debug!(%backend, "Backend available again")
            }
            Transition::EnteredOffline => {
                warn!("Both backends unavailable; entering offline mode")
            }
            Transition::LeftOffline => info!("A backend is reachable again; leaving offline mode"),
        }
    }
}

/// Stops the periodic loop on [`MonitorHandle::shutdown`].
pub struct MonitorHandle {
    task: JoinHandle<()>,
}

impl MonitorHandle {
    pub fn shutdown(self) {
        self.task.abort();
        info!("Health monitor stopped");
    }
}
