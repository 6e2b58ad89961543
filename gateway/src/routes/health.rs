use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use inference_common::{HealthResponse, HealthStatus};

use crate::llm::BackendProbe;
use crate::AppState;

pub const SERVICE_NAME: &str = "dgx-inference-gateway";

/// GET /health - always 200, reports the backend as healthy or offline.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, backend_models, error) = match state.backend.probe().await {
        BackendProbe::Online { models } => (HealthStatus::Healthy, Some(models), None),
        BackendProbe::Offline { error } => (HealthStatus::Offline, None, Some(error)),
    };

    Json(HealthResponse {
        status,
        service: SERVICE_NAME.to_string(),
        backend: state.backend.base_url().to_string(),
        available_models: state.config.models.available.clone(),
        backend_models,
        error,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
