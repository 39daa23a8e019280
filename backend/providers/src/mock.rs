use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use triton_core::{Backend, BackendClient, QueryContext};

/// In-process backend with a fixed reply, for tests and dry runs.
///
/// Counts every call so callers can assert exactly how many upstream
/// requests a code path made.
pub struct ScriptedBackend {
    backend: Backend,
    reply: Result<String, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn replying(backend: Backend, text: impl Into<String>) -> Self {
        Self {
            backend,
            reply: Ok(text.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(backend: Backend, message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            ..Self::replying(backend, "")
        }
    }

    /// Sleep before replying (tokio time, so paused clocks apply).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendClient for ScriptedBackend {
    fn backend(&self) -> Backend {
        self.backend
    }

    async fn send(&self, _query: &str, _context: &QueryContext) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => anyhow::bail!("{} backend: {}", self.backend, message),
        }
    }
}
