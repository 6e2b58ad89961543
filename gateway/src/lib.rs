pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod routes;
pub mod test_util;

pub use config::{BackendConfig, Config};
pub use error::Error;
pub use llm::{BackendError, BackendProbe, InferenceBackend, OllamaBackend, RawBackendResult};

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::{middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// Built once at startup; handlers only read it.
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn InferenceBackend>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn InferenceBackend>) -> Self {
        Self { config, backend }
    }
}

/// Build the gateway router with logging, CORS and panic translation.
pub fn build_router(state: Arc<AppState>) -> Router {
    routes::router()
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(logging::request_logger))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A panicking handler becomes a 500 envelope instead of a dropped connection.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    tracing::error!("Request handler panicked: {}", cause);
    Error::Unexpected(cause).into_response()
}
