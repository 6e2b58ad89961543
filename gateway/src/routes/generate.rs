//! Generation endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use inference_common::{GenerateParams, GenerationResponse};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::AppState;

/// Build the generation router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/inference", post(inference))
}

/// POST /inference - forward one prompt to the backend and time the round trip.
///
/// Exactly one of a [`GenerationResponse`] or an error envelope is returned.
async fn inference(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<GenerateParams>, JsonRejection>,
) -> Result<Json<GenerationResponse>> {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let Json(params) = payload.map_err(|e| Error::InvalidRequest(e.body_text()))?;
    let request = params.validate(&state.config.models.default).map_err(|e| {
        tracing::debug!(%request_id, "Rejected generation request: {}", e);
        Error::from(e)
    })?;

    tracing::debug!(
        %request_id,
        model = request.model(),
        max_tokens = request.max_tokens(),
        "Forwarding generation request to {}",
        state.backend.backend_type()
    );

    let result = state.backend.invoke(&request).await;
    let elapsed = start.elapsed();

    match result {
        Ok(raw) => {
            tracing::info!(
                %request_id,
                model = request.model(),
                elapsed_ms = %elapsed.as_millis(),
                "Generation succeeded"
            );
            Ok(Json(GenerationResponse::new(
                raw.text,
                request.model().to_string(),
                elapsed,
            )))
        }
        Err(e) => {
            let err = Error::from_backend(e, state.backend.timeout_seconds());
            tracing::warn!(
                %request_id,
                model = request.model(),
                elapsed_ms = %elapsed.as_millis(),
                "Generation failed: {}",
                err
            );
            Err(err)
        }
    }
}
