use std::sync::Arc;

use tokio::sync::RwLock;
use triton_core::BackendAvailability;

/// Shared availability snapshot.
///
/// The health monitor is the only writer; routing and the fallback chain
/// read whole snapshots. Last write wins.
#[derive(Clone, Default)]
pub struct AvailabilityState {
    inner: Arc<RwLock<BackendAvailability>>,
}

impl AvailabilityState {
    /// Both backends down and never checked.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> BackendAvailability {
        *self.inner.read().await
    }

    /// Store `next` and return the previous snapshot.
    pub async fn replace(&self, next: BackendAvailability) -> BackendAvailability {
        let mut guard = self.inner.write().await;
        std::mem::replace(&mut *guard, next)
    }

    /// Force availability without probing.
    pub async fn set(&self, remote_available: bool, local_available: bool) {
        self.replace(BackendAvailability::new(remote_available, local_available))
            .await;
    }

    pub async fn is_offline(&self) -> bool {
        self.snapshot().await.is_offline()
    }
}
