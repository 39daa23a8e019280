//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};

use triton_orchestrator::QueryOrchestrator;

use crate::{health_api, query_api, stats_api};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub orchestrator: Arc<QueryOrchestrator>,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(orchestrator: Arc<QueryOrchestrator>) -> Self {
        Self {
            orchestrator,
            started_at: Instant::now(),
        }
    }
}

pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/query", post(query_api::post_query))
        .route("/api/status", get(health_api::get_status))
        .route("/api/health", get(health_api::get_health))
        .route("/api/stats", get(stats_api::get_stats))
        .route("/api/stats/reset", post(stats_api::reset_stats))
        .route("/api/cache", delete(stats_api::clear_cache))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Gateway HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
