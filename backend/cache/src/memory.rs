//! In-process cache used when Redis is disabled or unreachable.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::store::CacheStore;

/// Writes between opportunistic sweeps.
const SWEEP_EVERY_WRITES: usize = 64;

#[derive(Default)]
struct Inner {
    values: HashMap<String, String>,
    expiries: HashMap<String, Instant>,
    writes_since_sweep: usize,
}

impl Inner {
    fn remove(&mut self, key: &str) -> bool {
        self.expiries.remove(key);
        self.values.remove(key).is_some()
    }

    fn sweep(&mut self, now: Instant) -> usize {
        let expired: Vec<String> = self
            .expiries
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(k, _)| k.clone())
            .collect();
        for key in &expired {
            self.remove(key);
        }
        self.writes_since_sweep = 0;
        expired.len()
    }
}

/// Key → value map plus key → expiry map.
///
/// Expired keys are evicted on read, by a sweep every few writes, and by the
/// background sweeper when one is running.
#[derive(Default)]
pub struct MemoryCacheStore {
    inner: Mutex<Inner>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.values.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove every expired entry now. Returns how many were dropped.
    pub async fn sweep(&self) -> usize {
        self.inner.lock().await.sweep(Instant::now())
    }

    /// Sweep on a fixed interval until the store is dropped or the handle aborted.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(store) = weak.upgrade() else { break };
                let removed = store.sweep().await;
                if removed > 0 {
                    debug!(removed, "Swept expired cache entries");
                }
            }
        })
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Option<String> {
        let mut inner = self.inner.lock().await;
        if let Some(at) = inner.expiries.get(key) {
            if *at <= Instant::now() {
                inner.remove(key);
                return None;
            }
        }
        inner.values.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> bool {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        inner.values.insert(key.to_string(), value.to_string());
        if ttl_secs > 0 {
            inner
                .expiries
                .insert(key.to_string(), now + Duration::from_secs(ttl_secs));
        } else {
            inner.expiries.remove(key);
        }

        inner.writes_since_sweep += 1;
        if inner.writes_since_sweep >= SWEEP_EVERY_WRITES {
            inner.sweep(now);
        }
        true
    }

    async fn del(&self, key: &str) -> bool {
        self.inner.lock().await.remove(key);
        true
    }

    async fn clear(&self) -> bool {
        let mut inner = self.inner.lock().await;
        inner.values.clear();
        inner.expiries.clear();
        inner.writes_since_sweep = 0;
        true
    }
}
