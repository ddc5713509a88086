use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::error::ApiError;
use crate::api::server::AppState;
use crate::types::{ServiceId, ServiceStateReport};

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Always answers 200: `UNKNOWN` is a state, not an error.
pub async fn get_service_state(
    State(state): State<AppState>,
    Path((cluster, service)): Path<(String, String)>,
) -> Json<ServiceStateReport> {
    let id = ServiceId::new(cluster, service);
    Json(state.aggregator.report(&id).await)
}

pub async fn get_cluster_states(
    State(state): State<AppState>,
    Path(cluster): Path<String>,
) -> Result<Json<Vec<ServiceStateReport>>, ApiError> {
    let reports = state.aggregator.compute_cluster_states(&cluster).await?;
    Ok(Json(reports))
}
