//! Health and service descriptor payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Overall health as reported by `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Offline,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    /// Base URL of the downstream backend.
    pub backend: String,
    pub available_models: Vec<String>,
    /// Models the backend reported as installed, when it was reachable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_models: Option<Vec<String>>,
    /// Why the backend probe failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub status: String,
    pub message: String,
    pub version: String,
    pub available_models: Vec<String>,
    /// Route name to path.
    pub endpoints: BTreeMap<String, String>,
}
