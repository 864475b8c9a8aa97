//! Cloud provider adapter.
//!
//! Presents the same contract as the local adapter while translating to
//! and from the vendor's wire format: canonical messages map one-to-one
//! into the vendor message array, the option bag maps onto `temperature`
//! and `max_tokens`, and the first completion choice maps back into the
//! canonical response. Translation lives in pure helpers so it can be
//! tested without a transport.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{ensure_success, parse_vector, trim_base_url, AsyncChatApi, ChatApi};
use crate::config::DEFAULT_OPENAI_BASE_URL;
use crate::types::{
    ChatOptions, ChatResponse, EmbeddingResponse, Message, MessageRole, ResponseMessage,
    ToolDefinition,
};
use crate::{Error, ErrorContext, Result};

pub(crate) const PROVIDER: &str = "openai";

/// Sampling temperature used when the option bag does not carry one.
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Blocking client for an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client with the vendor's public endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_OPENAI_BASE_URL)
    }

    /// Create a client against a custom endpoint (proxy, compatible API).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = required_api_key(&api_key.into())?;
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: trim_base_url(&base_url.into()),
            api_key,
        })
    }
}

impl ChatApi for OpenAiClient {
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
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;
        let status = response.status();
        let text = response.text()?;
        ensure_success(PROVIDER, "chat", status, &text)?;
        parse_chat_response(model, &serde_json::from_str(&text)?)
    }

    fn embeddings(&self, model: &str, prompt: &str) -> Result<EmbeddingResponse> {
        let response = self
            .http
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&embeddings_body(model, prompt))
            .send()?;
        let status = response.status();
        let text = response.text()?;
        ensure_success(PROVIDER, "embeddings", status, &text)?;
        parse_embeddings_response(&serde_json::from_str(&text)?)
    }
}

/// Non-blocking client for an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct AsyncOpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AsyncOpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = required_api_key(&api_key.into())?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: trim_base_url(&base_url.into()),
            api_key,
        })
    }
}

#[async_trait]
impl AsyncChatApi for AsyncOpenAiClient {
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
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        ensure_success(PROVIDER, "chat", status, &text)?;
        parse_chat_response(model, &serde_json::from_str(&text)?)
    }

    async fn embeddings(&self, model: &str, prompt: &str) -> Result<EmbeddingResponse> {
        let response = self
            .http
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&embeddings_body(model, prompt))
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        ensure_success(PROVIDER, "embeddings", status, &text)?;
        parse_embeddings_response(&serde_json::from_str(&text)?)
    }
}

pub(crate) fn required_api_key(api_key: &str) -> Result<String> {
    let trimmed = api_key.trim();
    if trimmed.is_empty() {
        return Err(Error::configuration_with_context(
            "cloud provider API key is required",
            ErrorContext::new()
                .with_field_path("OPENAI_API_KEY")
                .with_source("openai_client"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Build the vendor chat body from canonical parameters.
///
/// Mapping rules: `temperature` defaults to 0.7, `num_predict` becomes
/// `max_tokens` and is omitted entirely when absent, a `format` request
/// enables single-JSON-object mode, tools go through unchanged. Entries
/// of the option bag beyond the two interpreted ones are ignored.
pub(crate) fn build_chat_body(
    model: &str,
    messages: &[Message],
    options: Option<&ChatOptions>,
    format: Option<&Value>,
    tools: Option<&[ToolDefinition]>,
) -> Result<Value> {
    let temperature = options
        .and_then(ChatOptions::temperature)
        .unwrap_or(DEFAULT_TEMPERATURE);
    let mut body = serde_json::json!({
        "model": model,
        "messages": messages,
        "temperature": temperature,
    });
    if let Some(max_tokens) = options.and_then(ChatOptions::num_predict) {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }
    if format.is_some() {
        body["response_format"] = serde_json::json!({"type": "json_object"});
    }
    if let Some(tools) = tools {
        body["tools"] = serde_json::to_value(tools)?;
    }
    Ok(body)
}

/// Translate the vendor response into the canonical shape.
///
/// Only the first completion choice is consulted: its message content and
/// role, plus any tool calls attached to it. `done` is always true since
/// this layer is single-shot and non-streaming.
pub(crate) fn parse_chat_response(model: &str, body: &Value) -> Result<ChatResponse> {
    let message = body
        .pointer("/choices/0/message")
        .ok_or_else(|| Error::UnexpectedResponse {
            provider: PROVIDER,
            message: "missing first completion choice".to_string(),
        })?;
    let role = match message.get("role").and_then(Value::as_str) {
        Some("system") => MessageRole::System,
        Some("user") => MessageRole::User,
        Some("tool") => MessageRole::Tool,
        _ => MessageRole::Assistant,
    };
    // Content is null when the model answers purely with tool calls.
    let content = message
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let tool_calls = message
        .get("tool_calls")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Ok(ChatResponse {
        model: model.to_string(),
        message: ResponseMessage { role, content },
        tool_calls,
        done: true,
    })
}

fn embeddings_body(model: &str, prompt: &str) -> Value {
    serde_json::json!({
        "model": model,
        "input": prompt,
    })
}

pub(crate) fn parse_embeddings_response(body: &Value) -> Result<EmbeddingResponse> {
    let embedding = body
        .pointer("/data/0/embedding")
        .ok_or_else(|| Error::UnexpectedResponse {
            provider: PROVIDER,
            message: "missing embedding data".to_string(),
        })?;
    Ok(EmbeddingResponse {
        embedding: parse_vector(PROVIDER, embedding)?,
    })
}
