use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use inference_common::ServiceDescriptor;

use crate::AppState;

/// GET / - static description of the service and its routes.
async fn root(State(state): State<Arc<AppState>>) -> Json<ServiceDescriptor> {
    let endpoints = BTreeMap::from([
        ("health".to_string(), "/health".to_string()),
        ("inference".to_string(), "/inference".to_string()),
    ]);

    Json(ServiceDescriptor {
        status: "online".to_string(),
        message: "DGX Inference Gateway".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        available_models: state.config.models.available.clone(),
        endpoints,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(root))
}
