//! Backend status and process liveness.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub remote: &'static str,
    pub local: &'static str,
    pub offline_mode: bool,
    pub last_checked: Option<DateTime<Utc>>,
    pub cache: Option<&'static str>,
}

fn online(up: bool) -> &'static str {
    if up {
        "online"
    } else {
        "offline"
    }
}

/// Handler for `GET /api/status`
pub async fn get_status(State(state): State<GatewayState>) -> Json<StatusReport> {
    let snapshot = state.orchestrator.status().await;
    Json(StatusReport {
        remote: online(snapshot.remote_available),
        local: online(snapshot.local_available),
        offline_mode: snapshot.is_offline(),
        last_checked: snapshot.last_checked,
        cache: state.orchestrator.cache_backend(),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`: the gateway process itself, not the backends.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
    })
}
