use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use triton_config::RemoteBackendConfig;
use triton_core::{Backend, BackendClient, QueryContext};

use crate::prompt::build_remote_prompt;

/// Client for the high-capability remote model.
pub struct RemoteClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    max_tokens: u32,
    temperature: f32,
}

impl RemoteClient {
    pub fn new(config: &RemoteBackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    text: String,
}

#[async_trait]
impl BackendClient for RemoteClient {
    fn backend(&self) -> Backend {
        Backend::Remote
    }

    async fn send(&self, query: &str, context: &QueryContext) -> Result<String> {
        let start = Instant::now();
        let prompt = build_remote_prompt(query, context);
        let body = GenerateRequest {
            prompt: &prompt,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: false,
        };

        let mut request = self
            .client
            .post(format!("{}/generate", self.base_url))
            .timeout(self.timeout)
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("remote backend request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("remote backend returned {}: {}", status, error_body);
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("failed to parse remote backend response")?;

        debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            chars = parsed.text.len(),
            "Remote backend replied"
        );
        Ok(parsed.text)
    }
}
