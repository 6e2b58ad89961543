//! Error types at the gateway boundary.
//!
//! Every failure leaving an HTTP handler goes through [`Error`] and is
//! rendered as an [`ErrorEnvelope`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use inference_common::{ErrorEnvelope, ValidationError};

use crate::llm::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Inference request timed out after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: f64 },

    #[error("Inference failed: {0}")]
    Transport(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Translate a backend failure. `timeout_seconds` is the limit that was enforced.
    pub fn from_backend(err: BackendError, timeout_seconds: f64) -> Self {
        match err {
            BackendError::Timeout => Error::Timeout { timeout_seconds },
            BackendError::Transport(cause) => Error::Transport(cause),
            BackendError::Unexpected(cause) => Error::Unexpected(cause),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Error::Transport(_) | Error::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.status_code().as_u16(), self.to_string())
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::InvalidRequest(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.envelope())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
