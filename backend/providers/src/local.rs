use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use triton_config::LocalBackendConfig;
use triton_core::{Backend, BackendClient, QueryContext};

/// Client for the lightweight local model.
///
/// Sends the raw query and the context as structured fields; the local
/// service does its own prompt assembly.
pub struct LocalClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    max_length: u32,
    temperature: f32,
}

impl LocalClient {
    pub fn new(config: &LocalBackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_length: config.max_length,
            temperature: config.temperature,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct LocalRequest<'a> {
    input: &'a str,
    max_length: u32,
    temperature: f32,
    context: &'a QueryContext,
}

#[derive(Deserialize)]
struct LocalResponse {
    output: String,
}

#[async_trait]
impl BackendClient for LocalClient {
    fn backend(&self) -> Backend {
        Backend::Local
    }

    async fn send(&self, query: &str, context: &QueryContext) -> Result<String> {
        let body = LocalRequest {
            input: query,
            max_length: self.max_length,
            temperature: self.temperature,
            context,
        };

        debug!(max_length = self.max_length, "Sending request to local backend");

        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .context("local backend request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("local backend returned {}: {}", status, error_body);
        }

        let parsed: LocalResponse = response
            .json()
            .await
            .context("failed to parse local backend response")?;
        Ok(parsed.output)
    }
}
