use anyhow::Result;
use async_trait::async_trait;

use crate::context::QueryContext;
use crate::types::Backend;

/// Adapter for one AI completion backend.
///
/// Implementations own their payload format, headers, and timeout. They never
/// swallow errors; failure policy lives in the orchestrator.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Which backend this client talks to.
    fn backend(&self) -> Backend;

    /// Send a query and return the generated text.
    async fn send(&self, query: &str, context: &QueryContext) -> Result<String>;
}
