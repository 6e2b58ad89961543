//! Text generation request/response types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "llama3";

/// Token limit used when a request does not set `max_tokens`.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Sampling temperature used when a request does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Generation parameters as they arrive on the wire.
///
/// Every field is optional here so that a missing prompt is reported by
/// [`GenerateParams::validate`] rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Reasons a [`GenerateParams`] cannot become a [`GenerationRequest`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("max_tokens must be greater than 0, got {0}")]
    NonPositiveMaxTokens(i64),

    #[error("max_tokens is too large: {0}")]
    MaxTokensTooLarge(i64),

    #[error("temperature must be a finite number")]
    NonFiniteTemperature,
}

impl GenerateParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: i64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Check the parameters and fill in defaults.
    ///
    /// `default_model` replaces a missing `model`. A present value is kept as sent.
    pub fn validate(self, default_model: &str) -> Result<GenerationRequest, ValidationError> {
        let prompt = match self.prompt {
            Some(p) if !p.is_empty() => p,
            _ => return Err(ValidationError::EmptyPrompt),
        };

        let max_tokens = match self.max_tokens {
            None => DEFAULT_MAX_TOKENS,
            Some(n) if n <= 0 => return Err(ValidationError::NonPositiveMaxTokens(n)),
            Some(n) => u32::try_from(n).map_err(|_| ValidationError::MaxTokensTooLarge(n))?,
        };

        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !temperature.is_finite() {
            return Err(ValidationError::NonFiniteTemperature);
        }

        let model = self.model.unwrap_or_else(|| default_model.to_string());

        Ok(GenerationRequest {
            prompt,
            model,
            max_tokens,
            temperature,
        })
    }
}

/// A validated generation request. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    prompt: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl GenerationRequest {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// Successful generation result returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(rename = "response")]
    pub response_text: String,
    pub model: String,
    /// Wall time of the downstream round trip, in seconds with 2 decimals.
    #[serde(rename = "inference_time")]
    pub elapsed_seconds: f64,
}

impl GenerationResponse {
    pub fn new(response_text: String, model: String, elapsed: Duration) -> Self {
        Self {
            response_text,
            model,
            elapsed_seconds: round_seconds(elapsed),
        }
    }
}

/// Round a duration to seconds with two decimal places.
pub fn round_seconds(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}

/// Error body returned for every failed request.
///
/// `status_code` travels as the HTTP status, only `detail` is in the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(skip)]
    pub status_code: u16,
    pub detail: String,
}

impl ErrorEnvelope {
    pub fn new(status_code: u16, detail: impl Into<String>) -> Self {
        Self {
            status_code,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let req: GenerateParams = serde_json::from_str(r#"{"prompt": "Hello"}"#).unwrap();
        let req = req.validate(DEFAULT_MODEL).unwrap();
        assert_eq!(req.prompt(), "Hello");
        assert_eq!(req.model(), "llama3");
        assert_eq!(req.max_tokens(), 2048);
        assert_eq!(req.temperature(), 0.7);
    }

    #[test]
    fn test_all_fields_kept() {
        let json = r#"{
            "prompt": "Explain vector databases",
            "model": "mistral",
            "max_tokens": 128,
            "temperature": 1.2
        }"#;
        let params: GenerateParams = serde_json::from_str(json).unwrap();
        let req = params.validate(DEFAULT_MODEL).unwrap();
        assert_eq!(req.model(), "mistral");
        assert_eq!(req.max_tokens(), 128);
        assert_eq!(req.temperature(), 1.2);
    }

    #[test]
    fn test_missing_prompt_rejected() {
        let params: GenerateParams = serde_json::from_str(r#"{"model": "llama3"}"#).unwrap();
        assert_eq!(
            params.validate(DEFAULT_MODEL),
            Err(ValidationError::EmptyPrompt)
        );
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert_eq!(
            GenerateParams::new("").validate(DEFAULT_MODEL),
            Err(ValidationError::EmptyPrompt)
        );
    }

    #[test]
    fn test_whitespace_prompt_kept() {
        let req = GenerateParams::new("   \n").validate(DEFAULT_MODEL).unwrap();
        assert_eq!(req.prompt(), "   \n");
    }

    #[test]
    fn test_max_tokens_bounds() {
        assert_eq!(
            GenerateParams::new("hi").with_max_tokens(0).validate(DEFAULT_MODEL),
            Err(ValidationError::NonPositiveMaxTokens(0))
        );
        assert_eq!(
            GenerateParams::new("hi").with_max_tokens(-5).validate(DEFAULT_MODEL),
            Err(ValidationError::NonPositiveMaxTokens(-5))
        );
        let too_big = i64::from(u32::MAX) + 1;
        assert_eq!(
            GenerateParams::new("hi").with_max_tokens(too_big).validate(DEFAULT_MODEL),
            Err(ValidationError::MaxTokensTooLarge(too_big))
        );
        let req = GenerateParams::new("hi").with_max_tokens(1).validate(DEFAULT_MODEL).unwrap();
        assert_eq!(req.max_tokens(), 1);
    }

    #[test]
    fn test_present_model_kept_even_if_blank() {
        let req = GenerateParams::new("hi").with_model("").validate("mistral").unwrap();
        assert_eq!(req.model(), "");

        let req = GenerateParams::new("hi").validate("mistral").unwrap();
        assert_eq!(req.model(), "mistral");
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let params: GenerateParams =
            serde_json::from_str(r#"{"prompt": "hi", "temperature": 1e300}"#).unwrap();
        assert_eq!(
            params.validate(DEFAULT_MODEL),
            Err(ValidationError::NonFiniteTemperature)
        );

        assert_eq!(
            GenerateParams::new("hi")
                .with_temperature(f32::NAN)
                .validate(DEFAULT_MODEL),
            Err(ValidationError::NonFiniteTemperature)
        );
    }

    #[test]
    fn test_round_seconds() {
        assert_eq!(round_seconds(Duration::from_millis(1234)), 1.23);
        assert_eq!(round_seconds(Duration::from_millis(1239)), 1.24);
        assert_eq!(round_seconds(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_response_wire_names() {
        let resp = GenerationResponse::new(
            "Hi there".to_string(),
            "llama3".to_string(),
            Duration::from_millis(420),
        );
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["response"], "Hi there");
        assert_eq!(value["model"], "llama3");
        assert_eq!(value["inference_time"], 0.42);
    }

    #[test]
    fn test_error_envelope_body_only_has_detail() {
        let envelope = ErrorEnvelope::new(504, "timed out");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, serde_json::json!({ "detail": "timed out" }));
    }
}
