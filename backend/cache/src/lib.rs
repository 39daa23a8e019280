//! `triton-cache`: best-effort TTL cache for query results.
//!
//! Redis when configured and reachable, otherwise an in-process map with
//! expiry sweeping. Both implement [`CacheStore`] and behave the same to callers.

pub mod memory;
pub mod redis_store;
pub mod store;

pub use memory::MemoryCacheStore;
pub use redis_store::RedisCacheStore;
pub use store::{CacheEntry, CacheStore};

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};
use triton_config::CacheConfig;

/// An opened cache plus the sweeper task when the memory store is in use.
pub struct OpenedCache {
    pub store: Arc<dyn CacheStore>,
    pub sweeper: Option<JoinHandle<()>>,
}

/// Open Redis if configured and reachable, otherwise fall back to memory.
///
/// Never fails: an unreachable Redis degrades to the in-memory store.
pub async fn open_cache_store(config: &CacheConfig) -> OpenedCache {
    if let Some(url) = &config.redis_url {
        let connect_timeout = Duration::from_secs(config.connect_timeout_secs.max(1));
        let command_timeout = Duration::from_millis(config.command_timeout_ms.max(1));
        match RedisCacheStore::connect(url, &config.prefix, connect_timeout, command_timeout).await {
            Ok(store) => {
                return OpenedCache {
                    store: Arc::new(store),
                    sweeper: None,
                }
            }
            Err(e) => warn!("Redis unavailable, using in-memory cache: {e:#}"),
        }
    }

    let memory = Arc::new(MemoryCacheStore::new());
    let sweeper = memory.spawn_sweeper(Duration::from_secs(config.sweep_interval_secs.max(1)));
    info!("Using in-memory cache");
    OpenedCache {
        store: memory,
        sweeper: Some(sweeper),
    }
}
