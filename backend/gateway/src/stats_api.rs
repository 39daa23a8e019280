//! Counters and cache management.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::info;

use triton_orchestrator::StatsSnapshot;

use crate::server::GatewayState;

pub async fn get_stats(State(state): State<GatewayState>) -> Json<StatsSnapshot> {
    Json(state.orchestrator.stats())
}

pub async fn reset_stats(State(state): State<GatewayState>) -> StatusCode {
    state.orchestrator.reset_stats();
    info!("Query stats reset");
    StatusCode::NO_CONTENT
}

pub async fn clear_cache(State(state): State<GatewayState>) -> (StatusCode, Json<Value>) {
    let cleared = state.orchestrator.clear_cache().await;
    let status = if cleared {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(json!({ "cleared": cleared })))
}
