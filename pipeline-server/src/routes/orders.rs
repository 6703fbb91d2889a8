//! Order processing routes

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::{Order, OrderItem, PipelineConfig};
use uuid::Uuid;

use crate::core::{ServerError, ServerResult, ServerState};
use crate::pipeline::PipelineResult;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/orders/process", post(process))
        .route("/orders/{id}/status", get(status))
}

/// Order payload accepted by `POST /orders/process`
///
/// The id and creation timestamp are optional; the status is always
/// forced to pending before the run. An embedded `config` overrides the
/// server's default pipeline configuration for this call only.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOrderRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub config: Option<PipelineConfig>,
}

/// POST /orders/process - run an order through the master pipeline
async fn process(
    State(state): State<ServerState>,
    Json(payload): Json<ProcessOrderRequest>,
) -> impl IntoResponse {
    let config = payload.config.unwrap_or_else(|| {
        state
            .default_config
            .read()
            .map(|c| c.clone())
            .unwrap_or_default()
    });

    let mut order = Order::new(
        payload.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        payload.customer_id,
        payload.items,
    );
    if let Some(created_at) = payload.created_at {
        order.created_at = created_at;
    }
    order.metadata = payload.metadata;

    tracing::info!(order_id = %order.id, items = order.items.len(), "Processing order");
    let result = state.pipeline.process(order, config).await;
    state
        .statuses
        .insert(result.final_order.id.clone(), result.clone());

    let code = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (code, Json(result))
}

/// GET /orders/{id}/status - last recorded pipeline outcome for an order
async fn status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ServerResult<Json<PipelineResult>> {
    state
        .statuses
        .get(&id)
        .map(|r| Json(r.clone()))
        .ok_or(ServerError::NotFound)
}
