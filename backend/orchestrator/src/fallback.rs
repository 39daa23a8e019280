//! Fallback chain: one hop to the opposite backend, else a canned answer.

use anyhow::Result;
use tracing::info;

use triton_core::{QueryContext, QuerySource, TaskCategory};

use crate::offline::offline_response;
use crate::orchestrator::{Outcome, QueryOrchestrator};

impl QueryOrchestrator {
    /// Recover from a failed primary dispatch.
    ///
    /// Re-resolves the task against current availability and tries the
    /// opposite backend once if it is marked up. Never retries the original
    /// backend and never loops; an error here is a double failure.
    pub(crate) async fn handle_failure(
        &self,
        query: &str,
        context: &QueryContext,
        task: &TaskCategory,
    ) -> Result<Outcome> {
        let snapshot = self.availability.snapshot().await;
        let target = self.policy.resolve(task, &snapshot);

        if let Some(failed) = target.backend() {
            let alternate = failed.opposite();
            if snapshot.is_available(alternate) {
                info!(%failed, %alternate, "Falling back to alternate backend");
                let text = self.call(alternate, query, context).await?;
                return Ok(Outcome::new(text, QuerySource::fallback(alternate)));
            }
        }

        info!(task = %task.as_str(), "No alternate backend; serving offline response");
        Ok(Outcome::new(offline_response(task), QuerySource::OfflineFallback))
    }
}
