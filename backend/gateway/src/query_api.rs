//! `POST /api/query`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use triton_core::{QueryContext, QueryResult, TaskCategory, TritonError};

use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub context: Option<QueryContext>,
    #[serde(default)]
    pub task_category: Option<TaskCategory>,
}

/// Orchestrator error rendered as `{ "error": ... }`.
pub struct ApiError(pub TritonError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TritonError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            TritonError::DoubleFailure { .. } => StatusCode::BAD_GATEWAY,
        };
        if status.is_server_error() {
            error!("Query failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn post_query(
    State(state): State<GatewayState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResult>, ApiError> {
    let Json(req) =
        payload.map_err(|rejection| ApiError(TritonError::InvalidQuery(rejection.body_text())))?;
    let context = req.context.unwrap_or_default();
    let task = req.task_category.unwrap_or_default();
    state
        .orchestrator
        .process_query(&req.query, &context, &task)
        .await
        .map(Json)
        .map_err(ApiError)
}
