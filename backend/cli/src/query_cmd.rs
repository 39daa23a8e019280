//! `triton query`: one-shot, in-process.

use std::path::Path;

use anyhow::{Context, Result};

use triton_config::TritonConfig;
use triton_core::{QueryContext, TaskCategory};
use triton_orchestrator::TritonRuntime;

async fn read_context(path: Option<&Path>) -> Result<QueryContext> {
    let Some(path) = path else {
        return Ok(QueryContext::default());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read context file: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid context JSON in {}", path.display()))
}

pub async fn run(config: TritonConfig, text: &str, task: Option<&str>, context: Option<&Path>) -> Result<()> {
    let context = read_context(context).await?;
    let task = task.map(TaskCategory::from).unwrap_or_default();

    let runtime = TritonRuntime::start(config).await?;
    let outcome = runtime
        .orchestrator()
        .process_query(text, &context, &task)
        .await;
    runtime.shutdown();

    let result = outcome?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
