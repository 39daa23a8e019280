//! `triton status` and `triton check`.

use anyhow::{Context, Result};
use triton_config::TritonConfig;
use triton_core::BackendAvailability;
use triton_orchestrator::check_backends;
use triton_routing::RoutingTable;

fn label(up: bool) -> &'static str {
    if up {
        "online"
    } else {
        "offline"
    }
}

fn print_availability(status: &BackendAvailability) {
    println!("remote:       {}", label(status.remote_available));
    println!("local:        {}", label(status.local_available));
    println!("offline mode: {}", status.is_offline());
}

/// Ask a running server for its view of the backends.
pub async fn status(config: &TritonConfig) -> Result<()> {
    let host = match config.server.bind.as_str() {
        "0.0.0.0" | "::" => "127.0.0.1",
        other => other,
    };
    let url = format!("http://{}:{}/api/status", host, config.server.port);

    match reqwest::Client::new().get(&url).send().await {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => println!("Triton is not running on port {}", config.server.port),
    }
    Ok(())
}

fn routing_lines(table: &RoutingTable) -> Vec<String> {
    let mut lines: Vec<String> = table
        .entries()
        .into_iter()
        .map(|(task, pref)| format!("  {:<20} {}", task.as_str(), pref))
        .collect();
    lines.push(format!("  {:<20} {}", "(default)", table.default_backend()));
    lines
}

/// Probe the configured backends directly and show where each task routes.
pub async fn check(config: &TritonConfig) -> Result<()> {
    let table = RoutingTable::from_config(&config.routing).context("invalid routing table")?;

    println!("remote: {}", config.backends.remote.base_url);
    println!("local:  {}", config.backends.local.base_url);
    let status = check_backends(config).await;
    print_availability(&status);

    println!("routing:");
    for line in routing_lines(&table) {
        println!("{line}");
    }
    Ok(())
}
