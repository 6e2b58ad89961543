//! DGX Inference Common Types
//!
//! Shared types used by the gateway and by anything that calls it.

pub mod generation;
pub mod status;

pub use generation::{
    round_seconds, ErrorEnvelope, GenerateParams, GenerationRequest, GenerationResponse,
    ValidationError, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
pub use status::{HealthResponse, HealthStatus, ServiceDescriptor};
