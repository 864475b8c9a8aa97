//! # llm-switch
//!
//! A provider-switching client layer for chat completions and text
//! embeddings. Applications talk to one canonical contract; behind it,
//! requests are served either by a locally hosted Ollama server or by an
//! OpenAI-compatible cloud API, chosen per configuration at construction
//! time.
//!
//! ## Overview
//!
//! The crate exposes three capabilities, each constructed through the
//! [`factory`] module from a [`ProviderConfig`]:
//!
//! - a blocking chat client ([`ChatApi`])
//! - a non-blocking chat client ([`AsyncChatApi`])
//! - a batch embedding function ([`EmbeddingFunction`])
//!
//! Whichever provider is selected, callers only ever see the canonical
//! response shapes ([`ChatResponse`], [`EmbeddingResponse`]); the cloud
//! adapter translates the vendor wire format into them, the local adapter
//! passes them through untouched.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_switch::{factory, AsyncChatApi, Message, ProviderConfig};
//!
//! #[tokio::main]
//! async fn main() -> llm_switch::Result<()> {
//!     let config = ProviderConfig {
//!         ollama_base_url: "http://localhost:11434".into(),
//!         ..Default::default()
//!     };
//!
//!     let client = factory::async_chat_client(&config)?;
//!     let response = client
//!         .chat("llama3", &[Message::user("Hello")], None, None, None)
//!         .await?;
//!     println!("{}", response.message.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Configuration record and credential-presence rules |
//! | [`types`] | Canonical message, option, and response shapes |
//! | [`providers`] | Chat capability contract and the two adapters |
//! | [`embeddings`] | Batch embedding contract and the two adapters |
//! | [`factory`] | Provider selection and adapter construction |
//!
//! This layer is deliberately single-shot: no retries, no rate limiting,
//! no streaming, no fan-out. Orchestration belongs to callers; timeouts
//! and cancellation belong to the transport configuration.

pub mod config;
pub mod embeddings;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types for convenience
pub use config::ProviderConfig;
pub use embeddings::{EmbeddingFunction, OllamaEmbeddingFunction, OpenAiEmbeddingFunction};
pub use providers::{
    AsyncChatApi, AsyncOllamaClient, AsyncOpenAiClient, ChatApi, OllamaClient, OpenAiClient,
};
pub use types::{
    message::{Message, MessageRole},
    options::ChatOptions,
    response::{ChatResponse, EmbeddingResponse, ResponseMessage},
    tool::{FunctionDefinition, ToolDefinition},
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
