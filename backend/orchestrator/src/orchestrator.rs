//! Query Orchestrator
//!
//! Fingerprint → cache lookup → route → dispatch → cache write. A failed
//! dispatch goes through the one-hop fallback chain in `fallback.rs`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info, warn};

use triton_cache::{CacheEntry, CacheStore};
use triton_core::{
    Backend, BackendAvailability, QueryContext, QueryResult, QuerySource, Target, TaskCategory,
    TritonError,
};
use triton_health::AvailabilityState;
use triton_logging::{redact_sensitive_data, QueryEvent, QueryEventLogger};
use triton_providers::BackendSet;
use triton_routing::{fingerprint, RoutingPolicy};

use crate::offline::offline_response;
use crate::stats::{QueryStats, StatsSnapshot};

/// Text plus the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Outcome {
    pub text: String,
    pub source: QuerySource,
}

impl Outcome {
    pub(crate) fn new(text: impl Into<String>, source: QuerySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    /// Only backend-produced text is worth caching.
    fn cacheable(&self) -> bool {
        !self.source.is_offline() && self.source != QuerySource::Cache
    }
}

pub struct QueryOrchestrator {
    pub(crate) policy: RoutingPolicy,
    pub(crate) availability: AvailabilityState,
    pub(crate) backends: BackendSet,
    cache: Option<Arc<dyn CacheStore>>,
    cache_ttl_secs: u64,
    pub(crate) stats: QueryStats,
}

impl QueryOrchestrator {
    pub fn new(
        policy: RoutingPolicy,
        availability: AvailabilityState,
        backends: BackendSet,
    ) -> Self {
        Self {
            policy,
            availability,
            backends,
            cache: None,
            cache_ttl_secs: 0,
            stats: QueryStats::default(),
        }
    }

    /// Enable result caching with the given TTL.
    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>, ttl_secs: u64) -> Self {
        self.cache = Some(cache);
        self.cache_ttl_secs = ttl_secs;
        self
    }

    pub fn cache_backend(&self) -> Option<&'static str> {
        self.cache.as_ref().map(|c| c.name())
    }

    pub async fn status(&self) -> BackendAvailability {
        self.availability.snapshot().await
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Drop every cached result. `false` when caching is off or the store failed.
    pub async fn clear_cache(&self) -> bool {
        match &self.cache {
            Some(cache) => cache.clear().await,
            None => false,
        }
    }

    /// Answer a query.
    ///
    /// Always returns a result, offline included, except for a blank query or
    /// a primary dispatch and fallback that both fail.
    pub async fn process_query(
        &self,
        query: &str,
        context: &QueryContext,
        task: &TaskCategory,
    ) -> Result<QueryResult, TritonError> {
        if query.trim().is_empty() {
            return Err(TritonError::InvalidQuery("query text is empty".into()));
        }

        let start = Instant::now();
        let fp = fingerprint(query, context, task);
        self.stats.record_query();

        if let Some(text) = self.cached(&fp).await {
            self.stats.record_cache_hit();
            QueryEventLogger::log_event(&fp, QueryEvent::CacheHit);
            return Ok(finish(text, QuerySource::Cache, false, fp, start));
        }

        let snapshot = self.availability.snapshot().await;
        let target = self.policy.resolve(task, &snapshot);
        QueryEventLogger::log_event(
            &fp,
            QueryEvent::Dispatched {
                task: task.as_str().to_string(),
                target,
            },
        );

        let (outcome, fallback) = match self.dispatch(target, query, context, task).await {
            Ok(outcome) if outcome.source == QuerySource::OfflineFallback => {
                self.stats.record_fallback();
                QueryEventLogger::log_event(
                    &fp,
                    QueryEvent::Fallback {
                        failed: target,
                        next: None,
                        error_msg: "both consensus calls failed".into(),
                    },
                );
                (outcome, true)
            }
            Ok(outcome) => (outcome, false),
            Err(primary) => {
                warn!(fingerprint = %fp, %target, error = %scrub(&primary), "Primary dispatch failed");
                self.stats.record_fallback();
                match self.handle_failure(query, context, task).await {
                    Ok(outcome) => {
                        QueryEventLogger::log_event(
                            &fp,
                            QueryEvent::Fallback {
                                failed: target,
                                next: fallback_backend(outcome.source),
                                error_msg: format!("{primary:#}"),
                            },
                        );
                        (outcome, true)
                    }
                    Err(secondary) => {
                        self.stats.record_double_failure();
                        let err = TritonError::double_failure(&primary, &secondary);
                        QueryEventLogger::log_event(
                            &fp,
                            QueryEvent::Failed {
                                error_msg: err.to_string(),
                            },
                        );
                        return Err(err);
                    }
                }
            }
        };

        if outcome.source.is_offline() {
            self.stats.record_offline();
        }
        // Fallback-chain answers stay out of the cache so a recovered backend
        // gets asked again.
        if !fallback && outcome.cacheable() {
            self.store(&fp, &outcome.text).await;
        }

        let result = finish(outcome.text, outcome.source, fallback, fp, start);
        QueryEventLogger::log_event(
            &result.fingerprint,
            QueryEvent::Completed {
                source: result.source,
                processing_time_ms: result.processing_time_ms,
                fallback: result.fallback,
            },
        );
        Ok(result)
    }

    async fn cached(&self, fp: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        let raw = cache.get(fp).await?;
        match CacheEntry::decode(&raw) {
            Some(entry) => Some(entry.result),
            None => {
                debug!(fingerprint = %fp, "Ignoring unreadable cache entry");
                None
            }
        }
    }

    async fn store(&self, fp: &str, text: &str) {
        let Some(cache) = &self.cache else { return };
        let Some(payload) = CacheEntry::new(text).encode() else { return };
        if !cache.set(fp, &payload, self.cache_ttl_secs).await {
            debug!(fingerprint = %fp, "Cache write failed; continuing");
        }
    }

    /// Send to one backend, counting the call.
    pub(crate) async fn call(
        &self,
        backend: Backend,
        query: &str,
        context: &QueryContext,
    ) -> Result<String> {
        match backend {
            Backend::Remote => self.stats.record_remote_call(),
            Backend::Local => self.stats.record_local_call(),
        }
        let started = Instant::now();
        let reply = self.backends.get(backend).send(query, context).await;
        debug!(
            %backend,
            ok = reply.is_ok(),
            latency_ms = started.elapsed().as_millis() as u64,
            "Backend call finished"
        );
        reply
    }

    async fn single(&self, backend: Backend, query: &str, context: &QueryContext) -> Result<Outcome> {
        let text = self.call(backend, query, context).await?;
        Ok(Outcome::new(text, QuerySource::direct(backend)))
    }

    async fn dispatch(
        &self,
        target: Target,
        query: &str,
        context: &QueryContext,
        task: &TaskCategory,
    ) -> Result<Outcome> {
        match target {
            Target::Remote => self.single(Backend::Remote, query, context).await,
            Target::Local => self.single(Backend::Local, query, context).await,
            Target::Both => Ok(self.consensus(query, context, task).await),
            Target::Offline => {
                info!(task = %task.as_str(), "Serving offline response");
                Ok(Outcome::new(offline_response(task), QuerySource::Offline))
            }
        }
    }

    /// Fan out to both backends and wait for both.
    ///
    /// Remote wins when both answer. One failure yields the other's text as
    /// `<backend>-fallback`. Two failures yield the offline message.
    async fn consensus(&self, query: &str, context: &QueryContext, task: &TaskCategory) -> Outcome {
        let (remote, local) = futures::join!(
            self.call(Backend::Remote, query, context),
            self.call(Backend::Local, query, context),
        );
        match (remote, local) {
            (Ok(text), Ok(_)) => Outcome::new(text, QuerySource::ConsensusRemote),
            (Ok(text), Err(e)) => {
                warn!(error = %scrub(&e), "Local side of consensus failed");
                Outcome::new(text, QuerySource::RemoteFallback)
            }
            (Err(e), Ok(text)) => {
                warn!(error = %scrub(&e), "Remote side of consensus failed");
                Outcome::new(text, QuerySource::LocalFallback)
            }
            (Err(remote_err), Err(local_err)) => {
                warn!(
                    remote = %scrub(&remote_err),
                    local = %scrub(&local_err),
                    "Both sides of consensus failed; serving offline response"
                );
                Outcome::new(offline_response(task), QuerySource::OfflineFallback)
            }
        }
    }
}

fn scrub(err: &anyhow::Error) -> String {
    redact_sensitive_data(&format!("{err:#}"))
}

fn fallback_backend(source: QuerySource) -> Option<Backend> {
    match source {
        QuerySource::RemoteFallback => Some(Backend::Remote),
        QuerySource::LocalFallback => Some(Backend::Local),
        _ => None,
    }
}

fn finish(
    result: String,
    source: QuerySource,
    fallback: bool,
    fingerprint: String,
    start: Instant,
) -> QueryResult {
    QueryResult {
        result,
        source,
        processing_time_ms: elapsed_ms(start.elapsed()),
        fingerprint,
        fallback,
    }
}

fn elapsed_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offline::DEFAULT_OFFLINE_RESPONSE;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use serde_json::json;
    use triton_cache::MemoryCacheStore;
    use triton_config::{apply_all_defaults, TritonConfig};
    use triton_providers::ScriptedBackend;
    use triton_routing::RoutingTable;

    const WEATHER_QUERY: &str = "What is the weather risk near 10.5,-40.2?";
    const TTL_SECS: u64 = 60;

    struct Harness {
        orchestrator: QueryOrchestrator,
        remote: Arc<ScriptedBackend>,
        local: Arc<ScriptedBackend>,
        cache: Arc<MemoryCacheStore>,
    }

    fn policy() -> RoutingPolicy {
        let config = apply_all_defaults(TritonConfig::default());
        RoutingPolicy::new(RoutingTable::from_config(&config.routing).unwrap())
    }

    async fn harness(
        remote: ScriptedBackend,
        local: ScriptedBackend,
        remote_up: bool,
        local_up: bool,
    ) -> Harness {
        let availability = AvailabilityState::new();
        availability.set(remote_up, local_up).await;
        let remote = Arc::new(remote);
        let local = Arc::new(local);
        let cache = Arc::new(MemoryCacheStore::new());
        let orchestrator = QueryOrchestrator::new(
            policy(),
            availability,
            BackendSet::new(remote.clone(), local.clone()),
        )
        .with_cache(cache.clone(), TTL_SECS);
        Harness {
            orchestrator,
            remote,
            local,
            cache,
        }
    }

    fn healthy() -> (ScriptedBackend, ScriptedBackend) {
        (
            ScriptedBackend::replying(Backend::Remote, "Remote: moderate risk, 3m swell."),
            ScriptedBackend::replying(Backend::Local, "Local: some risk."),
        )
    }

    fn none() -> QueryContext {
        QueryContext::default()
    }

    #[tokio::test]
    async fn weather_query_goes_remote_then_hits_cache() {
        let (remote, local) = healthy();
        let h = harness(remote, local, true, true).await;
        let task = TaskCategory::WeatherAnalysis;

        let first = h.orchestrator.process_query(WEATHER_QUERY, &none(), &task).await.unwrap();
        assert_eq!(first.source, QuerySource::Remote);
        assert_eq!(first.result, "Remote: moderate risk, 3m swell.");
        assert!(!first.fallback);
        assert_eq!(h.remote.calls(), 1);
        assert_eq!(h.local.calls(), 0);

        let fp = fingerprint(WEATHER_QUERY, &none(), &task);
        assert_eq!(first.fingerprint, fp);
        let stored = CacheEntry::decode(&h.cache.get(&fp).await.unwrap()).unwrap();
        assert_eq!(stored.result, first.result);

        let second = h.orchestrator.process_query(WEATHER_QUERY, &none(), &task).await.unwrap();
        assert_eq!(second.source, QuerySource::Cache);
        assert_eq!(second.result, first.result);
        assert_eq!(second.fingerprint, fp);
        assert_eq!(h.remote.calls(), 1);
        assert_eq!(h.local.calls(), 0);

        let stats = h.orchestrator.stats();
        assert_eq!(stats.total_queries, 2);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.remote_calls, 1);
    }

    #[tokio::test]
    async fn request_metadata_does_not_defeat_the_cache() {
        let (remote, local) = healthy();
        let h = harness(remote, local, true, true).await;
        let task = TaskCategory::VesselTracking;
        let ctx_a: QueryContext = serde_json::from_value(json!({
            "vessel": { "name": "MV Aurora" }, "requestId": "a", "timestamp": "t1"
        }))
        .unwrap();
        let ctx_b: QueryContext = serde_json::from_value(json!({
            "vessel": { "name": "MV Aurora" }, "requestId": "b", "timestamp": "t2"
        }))
        .unwrap();

        let first = h.orchestrator.process_query("Where is she?", &ctx_a, &task).await.unwrap();
        let second = h.orchestrator.process_query("Where is she?", &ctx_b, &task).await.unwrap();
        assert_eq!(first.source, QuerySource::Local);
        assert_eq!(second.source, QuerySource::Cache);
        assert_eq!(h.local.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_fetched_again() {
        let (remote, local) = healthy();
        let h = harness(remote, local, true, true).await;
        let task = TaskCategory::WeatherAnalysis;

        h.orchestrator.process_query(WEATHER_QUERY, &none(), &task).await.unwrap();
        tokio::time::advance(Duration::from_secs(TTL_SECS + 1)).await;
        let again = h.orchestrator.process_query(WEATHER_QUERY, &none(), &task).await.unwrap();
        assert_eq!(again.source, QuerySource::Remote);
        assert_eq!(h.remote.calls(), 2);
    }

    #[tokio::test]
    async fn unreadable_cache_entry_is_a_miss() {
        let (remote, local) = healthy();
        let h = harness(remote, local, true, true).await;
        let task = TaskCategory::WeatherAnalysis;
        let fp = fingerprint(WEATHER_QUERY, &none(), &task);
        h.cache.set(&fp, "{not json", TTL_SECS).await;

        let result = h.orchestrator.process_query(WEATHER_QUERY, &none(), &task).await.unwrap();
        assert_eq!(result.source, QuerySource::Remote);
    }

    #[tokio::test(start_paused = true)]
    async fn consensus_prefers_remote_even_when_local_is_faster() {
        let remote = ScriptedBackend::replying(Backend::Remote, "Remote: abandon ship drill now.")
            .with_delay(Duration::from_secs(2));
        let local = ScriptedBackend::replying(Backend::Local, "Local: stay calm.");
        let h = harness(remote, local, true, true).await;

        let result = h
            .orchestrator
            .process_query("Fire in engine room", &none(), &TaskCategory::CriticalSafety)
            .await
            .unwrap();
        assert_eq!(result.source, QuerySource::ConsensusRemote);
        assert_eq!(result.result, "Remote: abandon ship drill now.");
        assert_eq!(h.remote.calls(), 1);
        assert_eq!(h.local.calls(), 1);
    }

    #[tokio::test]
    async fn consensus_with_one_failure_uses_the_survivor() {
        let remote = ScriptedBackend::failing(Backend::Remote, "HTTP 500");
        let local = ScriptedBackend::replying(Backend::Local, "Local: muster at lifeboats.");
        let h = harness(remote, local, true, true).await;

        let result = h
            .orchestrator
            .process_query("Fire in engine room", &none(), &TaskCategory::CriticalSafety)
            .await
            .unwrap();
        assert_eq!(result.source, QuerySource::LocalFallback);
        assert_eq!(result.result, "Local: muster at lifeboats.");
        assert!(!result.fallback);
        assert_eq!(h.cache.len().await, 1);
    }

    #[tokio::test]
    async fn consensus_with_two_failures_serves_offline_fallback() {
        let remote = ScriptedBackend::failing(Backend::Remote, "HTTP 500");
        let local = ScriptedBackend::failing(Backend::Local, "timed out");
        let h = harness(remote, local, true, true).await;
        let task = TaskCategory::CriticalSafety;

        let result = h.orchestrator.process_query("Fire", &none(), &task).await.unwrap();
        assert_eq!(result.source, QuerySource::OfflineFallback);
        assert_eq!(result.result, offline_response(&task));
        assert!(result.fallback);
        assert_eq!(h.remote.calls(), 1);
        assert_eq!(h.local.calls(), 1);
        assert!(h.cache.is_empty().await);
        assert_eq!(h.orchestrator.stats().fallbacks, 1);
    }

    #[tokio::test]
    async fn offline_mode_is_deterministic_and_makes_no_calls() {
        let (remote, local) = healthy();
        let h = harness(remote, local, false, false).await;

        for task in TaskCategory::KNOWN {
            let result = h.orchestrator.process_query("Status?", &none(), &task).await.unwrap();
            assert_eq!(result.source, QuerySource::Offline);
            assert_eq!(result.result, offline_response(&task));
            assert!(!result.fallback);
        }
        let unknown = TaskCategory::from("bunker-pricing");
        let result = h.orchestrator.process_query("Status?", &none(), &unknown).await.unwrap();
        assert_eq!(result.result, DEFAULT_OFFLINE_RESPONSE);

        assert_eq!(h.remote.calls(), 0);
        assert_eq!(h.local.calls(), 0);
        assert!(h.cache.is_empty().await);
        assert_eq!(h.orchestrator.stats().offline_responses, 8);
    }

    #[tokio::test]
    async fn primary_failure_falls_back_exactly_one_hop() {
        let remote = ScriptedBackend::failing(Backend::Remote, "connection refused");
        let local = ScriptedBackend::replying(Backend::Local, "Local: light winds.");
        let h = harness(remote, local, true, true).await;

        let result = h
            .orchestrator
            .process_query(WEATHER_QUERY, &none(), &TaskCategory::WeatherAnalysis)
            .await
            .unwrap();
        assert_eq!(result.source, QuerySource::LocalFallback);
        assert_eq!(result.result, "Local: light winds.");
        assert!(result.fallback);
        assert_eq!(h.remote.calls(), 1);
        assert_eq!(h.local.calls(), 1);
        // Fallback answers are not cached.
        assert!(h.cache.is_empty().await);
        assert_eq!(h.orchestrator.stats().fallbacks, 1);
    }

    #[tokio::test]
    async fn primary_failure_without_alternate_serves_offline_fallback() {
        let remote = ScriptedBackend::failing(Backend::Remote, "connection refused");
        let local = ScriptedBackend::replying(Backend::Local, "unused");
        let h = harness(remote, local, true, false).await;
        let task = TaskCategory::WeatherAnalysis;

        let result = h.orchestrator.process_query(WEATHER_QUERY, &none(), &task).await.unwrap();
        assert_eq!(result.source, QuerySource::OfflineFallback);
        assert_eq!(result.result, offline_response(&task));
        assert!(result.fallback);
        assert_eq!(h.local.calls(), 0);
    }

    #[tokio::test]
    async fn double_failure_names_both_causes() {
        let remote = ScriptedBackend::failing(Backend::Remote, "connection refused");
        let local = ScriptedBackend::failing(Backend::Local, "HTTP 503");
        let h = harness(remote, local, true, true).await;

        let err = h
            .orchestrator
            .process_query(WEATHER_QUERY, &none(), &TaskCategory::WeatherAnalysis)
            .await
            .unwrap_err();
        assert!(matches!(err, TritonError::DoubleFailure { .. }));
        let msg = err.to_string();
        assert!(msg.contains("remote backend: connection refused"), "{msg}");
        assert!(msg.contains("local backend: HTTP 503"), "{msg}");
        assert_eq!(h.remote.calls(), 1);
        assert_eq!(h.local.calls(), 1);
        assert_eq!(h.orchestrator.stats().double_failures, 1);
    }

    // Known limitation: simultaneous misses on one fingerprint each go upstream.
    #[tokio::test(start_paused = true)]
    async fn identical_concurrent_queries_are_not_deduplicated() {
        let remote = ScriptedBackend::replying(Backend::Remote, "Remote: calm.")
            .with_delay(Duration::from_secs(1));
        let local = ScriptedBackend::replying(Backend::Local, "unused");
        let h = harness(remote, local, true, true).await;
        let task = TaskCategory::WeatherAnalysis;

        let (ctx_a, ctx_b) = (none(), none());
        let (a, b) = futures::join!(
            h.orchestrator.process_query(WEATHER_QUERY, &ctx_a, &task),
            h.orchestrator.process_query(WEATHER_QUERY, &ctx_b, &task),
        );
        assert_eq!(a.unwrap().source, QuerySource::Remote);
        assert_eq!(b.unwrap().source, QuerySource::Remote);
        assert_eq!(h.remote.calls(), 2);
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let (remote, local) = healthy();
        let h = harness(remote, local, true, true).await;
        let err = h
            .orchestrator
            .process_query("   ", &none(), &TaskCategory::BasicQuery)
            .await
            .unwrap_err();
        assert!(matches!(err, TritonError::InvalidQuery(_)));
        assert_eq!(h.remote.calls() + h.local.calls(), 0);
    }

    #[tokio::test]
    async fn without_cache_every_call_goes_upstream() {
        let availability = AvailabilityState::new();
        availability.set(true, true).await;
        let local = Arc::new(ScriptedBackend::replying(Backend::Local, "ok"));
        let orchestrator = QueryOrchestrator::new(
            policy(),
            availability,
            BackendSet::new(
                Arc::new(ScriptedBackend::replying(Backend::Remote, "r")),
                local.clone(),
            ),
        );

        for _ in 0..2 {
            let result = orchestrator
                .process_query("Hello", &none(), &TaskCategory::BasicQuery)
                .await
                .unwrap();
            assert_eq!(result.source, QuerySource::Local);
        }
        assert_eq!(local.calls(), 2);
        assert!(!orchestrator.clear_cache().await);
        assert_eq!(orchestrator.cache_backend(), None);
    }

    #[tokio::test]
    async fn clear_cache_forces_refetch() {
        let (remote, local) = healthy();
        let h = harness(remote, local, true, true).await;
        let task = TaskCategory::WeatherAnalysis;

        h.orchestrator.process_query(WEATHER_QUERY, &none(), &task).await.unwrap();
        assert!(h.orchestrator.clear_cache().await);
        let result = h.orchestrator.process_query(WEATHER_QUERY, &none(), &task).await.unwrap();
        assert_eq!(result.source, QuerySource::Remote);
        assert_eq!(h.remote.calls(), 2);
    }

    /// Store whose every operation fails the way a dead backend would.
    #[derive(Default)]
    struct FailingCache {
        reads: AtomicUsize,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl CacheStore for FailingCache {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn get(&self, _key: &str) -> Option<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            None
        }

        async fn set(&self, _key: &str, _value: &str, _ttl_secs: u64) -> bool {
            self.writes.fetch_add(1, Ordering::SeqCst);
            false
        }

        async fn del(&self, _key: &str) -> bool {
            false
        }

        async fn clear(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn cache_failures_never_change_the_answer() {
        let availability = AvailabilityState::new();
        availability.set(true, true).await;
        let remote = Arc::new(ScriptedBackend::replying(Backend::Remote, "Remote: 3m swell."));
        let cache = Arc::new(FailingCache::default());
        let orchestrator = QueryOrchestrator::new(
            policy(),
            availability,
            BackendSet::new(remote.clone(), Arc::new(ScriptedBackend::replying(Backend::Local, "l"))),
        )
        .with_cache(cache.clone(), TTL_SECS);
        let task = TaskCategory::WeatherAnalysis;

        for _ in 0..2 {
            let result = orchestrator.process_query(WEATHER_QUERY, &none(), &task).await.unwrap();
            assert_eq!(result.source, QuerySource::Remote);
            assert_eq!(result.result, "Remote: 3m swell.");
            assert!(!result.fallback);
        }
        assert_eq!(remote.calls(), 2);
        assert_eq!(cache.reads.load(Ordering::SeqCst), 2);
        assert_eq!(cache.writes.load(Ordering::SeqCst), 2);
        assert_eq!(orchestrator.stats().cache_hits, 0);
        assert!(!orchestrator.clear_cache().await);
    }
}
