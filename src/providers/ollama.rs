//! Local provider adapter.
//!
//! The local inference server already speaks the canonical shapes, so this
//! adapter is a thin transport wrapper: it forwards the request body and
//! deserializes the reply directly, with no translation layer.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{ensure_success, trim_base_url, AsyncChatApi, ChatApi};
use crate::types::{ChatOptions, ChatResponse, EmbeddingResponse, Message, ToolDefinition};
use crate::{Error, ErrorContext, Result};

pub(crate) const PROVIDER: &str = "ollama";

/// Blocking client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the given base URL.
    ///
    /// The local provider has no default endpoint, so an empty URL is a
    /// construction-time configuration error rather than a request-time
    /// failure.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = required_base_url(&base_url.into())?;
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self { http, base_url })
    }
}

impl ChatApi for OllamaClient {
    fn provider_id(&self) -> &'static str {
        PROVIDER
    }

    fn chat(
        &self,
        model: &str,
        messages: &[Message],
        options: Option<&ChatOptions>,
        format: Option<&Value>,
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatResponse> {
        let body = build_chat_body(model, messages, options, format, tools)?;
        debug!(provider = PROVIDER, model, "sending chat request");
        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()?;
        let status = response.status();
        let text = response.text()?;
        ensure_success(PROVIDER, "chat", status, &text)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn embeddings(&self, model: &str, prompt: &str) -> Result<EmbeddingResponse> {
        let response = self
            .http
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&embeddings_body(model, prompt))
            .send()?;
        let status = response.status();
        let text = response.text()?;
        ensure_success(PROVIDER, "embeddings", status, &text)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Non-blocking client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct AsyncOllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl AsyncOllamaClient {
    /// See [`OllamaClient::new`]; the base URL is mandatory here too.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = required_base_url(&base_url.into())?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl AsyncChatApi for AsyncOllamaClient {
    fn provider_id(&self) -> &'static str {
        PROVIDER
    }

    async fn chat(
        &self,
        model: &str,
        messages: &[Message],
        options: Option<&ChatOptions>,
        format: Option<&Value>,
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatResponse> {
        let body = build_chat_body(model, messages, options, format, tools)?;
        debug!(provider = PROVIDER, model, "sending chat request");
        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        ensure_success(PROVIDER, "chat", status, &text)?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn embeddings(&self, model: &str, prompt: &str) -> Result<EmbeddingResponse> {
        let response = self
            .http
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&embeddings_body(model, prompt))
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        ensure_success(PROVIDER, "embeddings", status, &text)?;
        Ok(serde_json::from_str(&text)?)
    }
}

pub(crate) fn required_base_url(base_url: &str) -> Result<String> {
    let trimmed = trim_base_url(base_url);
    if trimmed.is_empty() {
        return Err(Error::configuration_with_context(
            "local provider base URL is required",
            ErrorContext::new()
                .with_field_path("OLLAMA_BASE_URL")
                .with_source("ollama_client"),
        ));
    }
    Ok(trimmed)
}

/// Assemble the chat body. The server's native shape is already the
/// canonical one, so the message list, option bag, format, and tools go
/// through verbatim; streaming is pinned off.
fn build_chat_body(
    model: &str,
    messages: &[Message],
    options: Option<&ChatOptions>,
    format: Option<&Value>,
    tools: Option<&[ToolDefinition]>,
) -> Result<Value> {
    let mut body = serde_json::json!({
        "model": model,
        "messages": messages,
        "stream": false,
    });
    if let Some(options) = options {
        body["options"] = serde_json::to_value(options)?;
    }
    if let Some(format) = format {
        body["format"] = format.clone();
    }
    if let Some(tools) = tools {
        body["tools"] = serde_json::to_value(tools)?;
    }
    Ok(body)
}

fn embeddings_body(model: &str, prompt: &str) -> Value {
    serde_json::json!({
        "model": model,
        "prompt": prompt,
    })
}
