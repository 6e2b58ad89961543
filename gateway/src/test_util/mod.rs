pub mod mock_ollama;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use inference_common::GenerationRequest;

use crate::config::{BackendConfig, Config};
use crate::llm::{BackendError, BackendProbe, InferenceBackend, RawBackendResult};
use crate::{build_router, AppState};

pub fn test_config() -> Config {
    Config {
        backend: BackendConfig {
            base_url: "http://mock-backend".to_string(),
            api_key: None,
            timeout_seconds: 30.0,
        },
        ..Config::default()
    }
}

/// Gateway router over the given backend with [`test_config`].
pub fn test_app(backend: Arc<dyn InferenceBackend>) -> Router {
    build_router(Arc::new(AppState::new(test_config(), backend)))
}

/// What a [`MockBackend`] does when invoked.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    /// Reply with the request's prompt.
    Echo,
    Fail(BackendError),
    Panic(String),
}

/// In-process backend that counts calls and records the last request.
pub struct MockBackend {
    reply: MockReply,
    probe: BackendProbe,
    delay: Option<Duration>,
    timeout_seconds: f64,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl MockBackend {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            probe: BackendProbe::Online {
                models: vec!["llama3:latest".to_string()],
            },
            delay: None,
            timeout_seconds: 30.0,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(MockReply::Text(text.to_string()))
    }

    pub fn echo() -> Self {
        Self::new(MockReply::Echo)
    }

    pub fn failing(err: BackendError) -> Self {
        Self::new(MockReply::Fail(err))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: f64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn offline(mut self, error: &str) -> Self {
        self.probe = BackendProbe::Offline {
            error: error.to_string(),
        };
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    fn backend_type(&self) -> &'static str {
        "mock"
    }

    fn base_url(&self) -> &str {
        "http://mock-backend"
    }

    fn timeout_seconds(&self) -> f64 {
        self.timeout_seconds
    }

    async fn invoke(&self, request: &GenerationRequest) -> Result<RawBackendResult, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            MockReply::Text(text) => Ok(RawBackendResult { text: text.clone() }),
            MockReply::Echo => Ok(RawBackendResult {
                text: request.prompt().to_string(),
            }),
            MockReply::Fail(err) => Err(err.clone()),
            MockReply::Panic(message) => panic!("{}", message),
        }
    }

    async fn probe(&self) -> BackendProbe {
        self.probe.clone()
    }
}
