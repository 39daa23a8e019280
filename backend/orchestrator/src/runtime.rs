//! Process-wide context: everything a running Triton needs, built once.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::info;

use triton_cache::open_cache_store;
use triton_config::TritonConfig;
use triton_core::BackendAvailability;
use triton_health::{AvailabilityState, HealthMonitor, MonitorHandle};
use triton_providers::BackendSet;
use triton_routing::{RoutingPolicy, RoutingTable};

use crate::orchestrator::QueryOrchestrator;

pub struct TritonRuntime {
    orchestrator: Arc<QueryOrchestrator>,
    monitor: MonitorHandle,
    cache_sweeper: Option<JoinHandle<()>>,
}

impl TritonRuntime {
    /// Build every component from `config` and run the first health check.
    pub async fn start(config: TritonConfig) -> Result<Self> {
        let table = RoutingTable::from_config(&config.routing).context("invalid routing table")?;
        let availability = AvailabilityState::new();

        let mut orchestrator = QueryOrchestrator::new(
            RoutingPolicy::new(table),
            availability.clone(),
            BackendSet::from_config(&config.backends),
        );

        let mut cache_sweeper = None;
        if config.cache.enabled {
            let opened = open_cache_store(&config.cache).await;
            cache_sweeper = opened.sweeper;
            orchestrator = orchestrator.with_cache(opened.store, config.cache.ttl_secs);
        } else {
            info!("Result caching disabled");
        }

        let monitor = Arc::new(HealthMonitor::from_config(
            availability,
            &config.health,
            &config.backends,
        ))
        .start()
        .await;

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            monitor,
            cache_sweeper,
        })
    }

    pub fn orchestrator(&self) -> Arc<QueryOrchestrator> {
        self.orchestrator.clone()
    }

    /// Stop the health loop and the cache sweeper.
    pub fn shutdown(self) {
        self.monitor.shutdown();
        if let Some(sweeper) = self.cache_sweeper {
            sweeper.abort();
        }
        info!("Triton runtime stopped");
    }
}

/// Probe both configured backends once, without starting anything.
pub async fn check_backends(config: &TritonConfig) -> BackendAvailability {
    HealthMonitor::from_config(AvailabilityState::new(), &config.health, &config.backends)
        .check_status()
        .await
}
