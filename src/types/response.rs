//! Canonical response shapes.
//!
//! These are the only shapes callers ever see, regardless of which
//! provider served the request. They double as the local provider's
//! native wire format, which is deserialized into them directly.

use serde::{Deserialize, Serialize};

/// Canonical chat completion result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub message: ResponseMessage,
    /// Tool calls requested by the model, in the order the provider
    /// returned them. Kept as raw JSON descriptors and passed through
    /// unmodified.
    #[serde(default)]
    pub tool_calls: Vec<serde_json::Value>,
    /// Always `true` for this layer; requests are single-shot and
    /// non-streaming.
    #[serde(default)]
    pub done: bool,
}

/// The assistant message inside a [`ChatResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub role: super::MessageRole,
    pub content: String,
}

/// Canonical embedding result: one dense vector for the input prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
}
