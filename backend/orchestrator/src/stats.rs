use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Lock-free query counters.
#[derive(Debug, Default)]
pub struct QueryStats {
    total_queries: AtomicU64,
    cache_hits: AtomicU64,
    remote_calls: AtomicU64,
    local_calls: AtomicU64,
    fallbacks: AtomicU64,
    offline_responses: AtomicU64,
    double_failures: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_queries: u64,
    pub cache_hits: u64,
    pub remote_calls: u64,
    pub local_calls: u64,
    pub fallbacks: u64,
    pub offline_responses: u64,
    pub double_failures: u64,
}

impl QueryStats {
    pub fn record_query(&self) {
        self.total_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_remote_call(&self) {
        self.remote_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_local_call(&self) {
        self.local_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_offline(&self) {
        self.offline_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_double_failure(&self) {
        self.double_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_queries: self.total_queries.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            remote_calls: self.remote_calls.load(Ordering::Relaxed),
            local_calls: self.local_calls.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            offline_responses: self.offline_responses.load(Ordering::Relaxed),
            double_failures: self.double_failures.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.total_queries,
            &self.cache_hits,
            &self.remote_calls,
            &self.local_calls,
            &self.fallbacks,
            &self.offline_responses,
            &self.double_failures,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_reset() {
        let stats = QueryStats::default();
        stats.record_query();
        stats.record_query();
        stats.record_cache_hit();
        stats.record_remote_call();
        let snap = stats.snapshot();
        assert_eq!(snap.total_queries, 2);
        assert_eq!(snap.cache_hits, 1);
        assert_eq!(snap.remote_calls, 1);

        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let json = serde_json::to_value(StatsSnapshot::default()).unwrap();
        assert!(json.get("offlineResponses").is_some());
    }
}
