//! Canned Ollama payloads for wiremock servers.

use serde_json::{json, Value};

/// Body of a finished non-streaming `/api/generate` call.
pub fn generate_json(model: &str, text: &str) -> Value {
    json!({
        "model": model,
        "created_at": "2024-05-01T12:00:00Z",
        "response": text,
        "done": true,
        "done_reason": "stop",
        "prompt_eval_count": 12,
        "eval_count": text.split_whitespace().count()
    })
}

/// A finished `/api/generate` body with no `response` field.
pub fn generate_json_without_text(model: &str) -> Value {
    json!({
        "model": model,
        "done": true
    })
}

/// Body of `/api/tags` listing the given models.
pub fn tags_json(models: &[&str]) -> Value {
    let models: Vec<Value> = models
        .iter()
        .map(|name| json!({ "name": name, "size": 4_661_224_676u64 }))
        .collect();
    json!({ "models": models })
}

pub fn error_json(message: &str) -> Value {
    json!({ "error": message })
}
