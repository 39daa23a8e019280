use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Liveness check for one backend. Never errors; unreachable is `false`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self) -> bool;
}

/// `GET {base_url}/health`; HTTP 200 means available.
pub struct HttpHealthProbe {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpHealthProbe {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}/health", base_url.trim_end_matches('/')),
            timeout,
        }
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self) -> bool {
        match self.client.get(&self.url).timeout(self.timeout).send().await {
            Ok(resp) => {
                let up = resp.status() == reqwest::StatusCode::OK;
                if !up {
                    debug!(url = %self.url, status = %resp.status(), "Health probe got non-200");
                }
                up
            }
            Err(e) => {
                debug!(url = %self.url, "Health probe failed: {e}");
                false
            }
        }
    }
}
