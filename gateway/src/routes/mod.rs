//! HTTP routes.

pub mod generate;
pub mod health;
pub mod root;

use std::sync::Arc;

use axum::Router;

use crate::AppState;

/// Build the combined router, still awaiting its state.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(root::router())
        .merge(health::router())
        .merge(generate::router())
}
