use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::health::ServiceHealthAggregator;
use crate::topology::TopologyProvider;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<ServiceHealthAggregator<dyn TopologyProvider>>,
}

impl AppState {
    pub fn new(provider: Arc<dyn TopologyProvider>) -> Self {
        Self {
            aggregator: Arc::new(ServiceHealthAggregator::new(provider)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/clusters/:cluster/services/:service/state",
            get(handlers::get_service_state),
        )
        .route("/clusters/:cluster/states", get(handlers::get_cluster_states))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    log::info!("svcstate API server listening on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
