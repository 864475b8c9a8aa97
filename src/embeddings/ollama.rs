//! Local embedding function.

use serde_json::Value;

use super::EmbeddingFunction;
use crate::providers::ollama::{required_base_url, PROVIDER};
use crate::providers::{ensure_success, parse_vector};
use crate::{Error, ErrorContext, Result};

/// Embedding function backed by a local Ollama server.
///
/// The local embeddings endpoint takes one prompt per request, so a batch
/// is iterated in input order, one call per text.
#[derive(Debug, Clone)]
pub struct OllamaEmbeddingFunction {
    http: reqwest::blocking::Client,
    url: String,
    model: String,
}

impl OllamaEmbeddingFunction {
    /// Create a function for `{base_url}/api/embeddings` with the given
    /// model. Both the base URL and the model name are mandatory.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let base_url = required_base_url(&base_url.into())?;
        let model = required_model(&model.into())?;
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            http,
            url: format!("{base_url}/api/embeddings"),
            model,
        })
    }
}

impl EmbeddingFunction for OllamaEmbeddingFunction {
    fn provider_id(&self) -> &'static str {
        PROVIDER
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            let response = self
                .http
                .post(&self.url)
                .json(&serde_json::json!({
                    "model": self.model,
                    "prompt": text,
                }))
                .send()?;
            let status = response.status();
            let body = response.text()?;
            ensure_success(PROVIDER, "embeddings", status, &body)?;
            let value: Value = serde_json::from_str(&body)?;
            let embedding = value
                .get("embedding")
                .ok_or_else(|| Error::UnexpectedResponse {
                    provider: PROVIDER,
                    message: "missing embedding field".to_string(),
                })?;
            vectors.push(parse_vector(PROVIDER, embedding)?);
        }
        Ok(vectors)
    }
}

fn required_model(model: &str) -> Result<String> {
    let trimmed = model.trim();
    if trimmed.is_empty() {
        return Err(Error::configuration_with_context(
            "embedding model name is required",
            ErrorContext::new()
                .with_field_path("EMBEDDING_MODEL")
                .with_source("ollama_embedding"),
        ));
    }
    Ok(trimmed.to_string())
}
