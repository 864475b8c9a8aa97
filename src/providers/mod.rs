//! Chat capability contract and the two provider adapters.
//!
//! The source of truth for callers is a pair of object-safe traits,
//! [`ChatApi`] (blocking) and [`AsyncChatApi`] (non-blocking). Both
//! adapters implement both; the factory hands out `Box<dyn ChatApi>` or
//! `Box<dyn AsyncChatApi>` so application code never names a provider.

pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::{ChatOptions, ChatResponse, EmbeddingResponse, Message, ToolDefinition};
use crate::{Error, Result};

pub use ollama::{AsyncOllamaClient, OllamaClient};
pub use openai::{AsyncOpenAiClient, OpenAiClient};

/// Blocking chat capability.
///
/// `options`, `format`, and `tools` are all optional; a `format` value
/// requests structured (single JSON object) output. Implementations hold
/// no mutable state, so a shared reference can be used from any number of
/// threads.
pub trait ChatApi: Send + Sync {
    /// Identifier of the provider serving this client.
    fn provider_id(&self) -> &'static str;

    /// Send a chat completion request and return the canonical response.
    fn chat(
        &self,
        model: &str,
        messages: &[Message],
        options: Option<&ChatOptions>,
        format: Option<&Value>,
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatResponse>;

    /// Embed a single prompt.
    fn embeddings(&self, model: &str, prompt: &str) -> Result<EmbeddingResponse>;
}

/// Non-blocking counterpart of [`ChatApi`].
///
/// Functionally identical; the only difference is that the calling task
/// yields during the network round trip.
#[async_trait]
pub trait AsyncChatApi: Send + Sync {
    fn provider_id(&self) -> &'static str;

    async fn chat(
        &self,
        model: &str,
        messages: &[Message],
        options: Option<&ChatOptions>,
        format: Option<&Value>,
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatResponse>;

    async fn embeddings(&self, model: &str, prompt: &str) -> Result<EmbeddingResponse>;
}

/// Trim whitespace and any trailing slash so paths can be appended safely.
pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Map a non-success vendor status to [`Error::Provider`], logging the raw
/// error body at the point of detection.
pub(crate) fn ensure_success(
    provider: &'static str,
    operation: &'static str,
    status: reqwest::StatusCode,
    body: &str,
) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    tracing::error!(
        provider,
        operation,
        status = status.as_u16(),
        body,
        "provider request failed"
    );
    Err(Error::Provider {
        provider,
        status: status.as_u16(),
        body: body.to_string(),
    })
}

/// Decode a JSON embedding array into a dense `f32` vector.
pub(crate) fn parse_vector(provider: &'static str, value: &Value) -> Result<Vec<f32>> {
    let items = value.as_array().ok_or_else(|| Error::UnexpectedResponse {
        provider,
        message: "embedding is not an array".to_string(),
    })?;
    let mut vector = Vec::with_capacity(items.len());
    for item in items {
        let number = item.as_f64().ok_or_else(|| Error::UnexpectedResponse {
            provider,
            message: "embedding contains a non-numeric value".to_string(),
        })?;
        vector.push(number as f32);
    }
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_base_url_strips_trailing_slash() {
        assert_eq!(trim_base_url(" http://host:11434/ "), "http://host:11434");
        assert_eq!(trim_base_url("http://host"), "http://host");
    }

    #[test]
    fn ensure_success_passes_2xx_and_fails_others() {
        assert!(ensure_success("openai", "chat", reqwest::StatusCode::OK, "").is_ok());
        let err = ensure_success(
            "openai",
            "chat",
            reqwest::StatusCode::UNAUTHORIZED,
            "bad key",
        )
        .unwrap_err();
        match err {
            Error::Provider {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, "openai");
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn parse_vector_rejects_non_numeric_entries() {
        let ok = parse_vector("openai", &serde_json::json!([0.1, 0.2])).unwrap();
        assert_eq!(ok, vec![0.1f32, 0.2f32]);
        assert!(parse_vector("openai", &serde_json::json!(["x"])).is_err());
        assert!(parse_vector("openai", &serde_json::json!({})).is_err());
    }
}
