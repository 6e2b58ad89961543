//! Inference backend abstraction.
//!
//! The gateway talks to its downstream model server only through the
//! [`InferenceBackend`] trait, so handlers can be driven by a mock in tests.

mod ollama;

pub use ollama::OllamaBackend;

use async_trait::async_trait;
use inference_common::GenerationRequest;
use serde::Serialize;

/// Text produced by one successful backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBackendResult {
    /// Generated text. Empty when the backend sent no `response` field.
    pub text: String,
}

/// Failure kinds of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The call did not complete within the configured timeout.
    #[error("backend request timed out")]
    Timeout,

    /// Connection failure or non-2xx status.
    #[error("{0}")]
    Transport(String),

    /// Anything else, e.g. a body that is not the expected JSON.
    #[error("{0}")]
    Unexpected(String),
}

/// Outcome of a liveness probe. Probing never fails, it reports offline instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BackendProbe {
    Online { models: Vec<String> },
    Offline { error: String },
}

impl BackendProbe {
    pub fn is_online(&self) -> bool {
        matches!(self, BackendProbe::Online { .. })
    }
}

/// A downstream text generation service.
///
/// Implementations hold only read-only state; one instance serves all
/// concurrent requests.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Identifier for logs (e.g. "ollama").
    fn backend_type(&self) -> &'static str;

    /// Address the backend is reached at.
    fn base_url(&self) -> &str;

    /// Hard limit enforced on [`InferenceBackend::invoke`], in seconds.
    fn timeout_seconds(&self) -> f64;

    /// Run one non-streaming generation. Single attempt, no retries.
    async fn invoke(&self, request: &GenerationRequest) -> Result<RawBackendResult, BackendError>;

    /// Check whether the backend is reachable.
    async fn probe(&self) -> BackendProbe;
}
