//! Pipeline configuration routes

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use shared::PipelineConfig;

use crate::core::{ServerResult, ServerState};

pub fn router() -> Router<ServerState> {
    Router::new().route("/pipeline/config", get(get_config).put(put_config))
}

/// GET /pipeline/config - current default configuration
async fn get_config(State(state): State<ServerState>) -> ServerResult<Json<PipelineConfig>> {
    let config = state
        .default_config
        .read()
        .map(|c| c.clone())
        .unwrap_or_default();
    Ok(Json(config))
}

/// PUT /pipeline/config - replace the default configuration wholesale
async fn put_config(
    State(state): State<ServerState>,
    Json(payload): Json<PipelineConfig>,
) -> ServerResult<Json<PipelineConfig>> {
    if let Ok(mut config) = state.default_config.write() {
        *config = payload.clone();
    }
    tracing::info!("Pipeline default configuration replaced");
    Ok(Json(payload))
}
