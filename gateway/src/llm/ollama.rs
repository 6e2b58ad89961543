//! Ollama backend client.

use std::time::Duration;

use async_trait::async_trait;
use inference_common::GenerationRequest;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::{BackendError, BackendProbe, InferenceBackend, RawBackendResult};
use crate::config::BackendConfig;

const GENERATE_PATH: &str = "/api/generate";
const TAGS_PATH: &str = "/api/tags";
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for an Ollama-compatible `/api/generate` endpoint.
///
/// The reqwest client carries a total timeout covering connect, send and
/// body receive of every call.
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    bearer_token: Option<String>,
    timeout_seconds: f64,
}

impl OllamaBackend {
    pub fn new(config: &BackendConfig) -> reqwest::Result<Self> {
        let http_client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token().map(str::to_string),
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Attach the bearer credential when one is configured.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

// ============================================================================
// Ollama API types
// ============================================================================

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// Response from /api/tags endpoint.
#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModelInfo>,
}

#[derive(Debug, Deserialize)]
struct OllamaModelInfo {
    name: String,
}

fn classify(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout
    } else if err.is_decode() {
        BackendError::Unexpected(err.to_string())
    } else {
        BackendError::Transport(err.to_string())
    }
}

// ============================================================================
// InferenceBackend implementation
// ============================================================================

#[async_trait]
impl InferenceBackend for OllamaBackend {
    fn backend_type(&self) -> &'static str {
        "ollama"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> f64 {
        self.timeout_seconds
    }

    async fn invoke(&self, request: &GenerationRequest) -> Result<RawBackendResult, BackendError> {
        let url = format!("{}{}", self.base_url, GENERATE_PATH);
        let body = OllamaGenerateRequest {
            model: request.model(),
            prompt: request.prompt(),
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature(),
                num_predict: request.max_tokens(),
            },
        };

        tracing::debug!("Sending generate request to Ollama: {} model={}", url, request.model());

        let response = self
            .authorize(self.http_client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.map_err(classify)?;
            return Err(BackendError::Transport(format!("{}: {}", status, body)));
        }

        let generated: OllamaGenerateResponse = response.json().await.map_err(classify)?;

        Ok(RawBackendResult {
            text: generated.response.unwrap_or_default(),
        })
    }

    async fn probe(&self) -> BackendProbe {
        let url = format!("{}{}", self.base_url, TAGS_PATH);

        let response = match self
            .authorize(self.http_client.get(&url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Ollama probe failed: {}", e);
                return BackendProbe::Offline {
                    error: e.to_string(),
                };
            }
        };

        if !response.status().is_success() {
            return BackendProbe::Offline {
                error: format!("Ollama returned {}", response.status()),
            };
        }

        match response.json::<OllamaTagsResponse>().await {
            Ok(tags) => BackendProbe::Online {
                models: tags.models.into_iter().map(|m| m.name).collect(),
            },
            Err(e) => BackendProbe::Offline {
                error: e.to_string(),
            },
        }
    }
}
