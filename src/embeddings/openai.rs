//! Cloud embedding function.

use serde_json::Value;

use super::EmbeddingFunction;
use crate::providers::openai::{required_api_key, PROVIDER};
use crate::providers::{ensure_success, parse_vector, trim_base_url};
use crate::{Error, Result};

/// Embedding function backed by an OpenAI-compatible API.
///
/// The vendor accepts a whole batch in one call and returns the result
/// objects in input order; that order is taken as-is, never re-sorted.
#[derive(Debug, Clone)]
pub struct OpenAiEmbeddingFunction {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbeddingFunction {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let api_key = required_api_key(&api_key.into())?;
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: trim_base_url(&base_url.into()),
            api_key,
            model: model.into(),
        })
    }
}

impl EmbeddingFunction for OpenAiEmbeddingFunction {
    fn provider_id(&self) -> &'static str {
        PROVIDER
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let response = self
            .http
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "input": texts,
            }))
            .send()?;
        let status = response.status();
        let body = response.text()?;
        ensure_success(PROVIDER, "embeddings", status, &body)?;

        let value: Value = serde_json::from_str(&body)?;
        let items = value
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::UnexpectedResponse {
                provider: PROVIDER,
                message: "missing data array".to_string(),
            })?;
        let mut vectors = Vec::with_capacity(items.len());
        for item in items {
            let embedding = item
                .get("embedding")
                .ok_or_else(|| Error::UnexpectedResponse {
                    provider: PROVIDER,
                    message: "result object without embedding".to_string(),
                })?;
            vectors.push(parse_vector(PROVIDER, embedding)?);
        }
        if vectors.len() != texts.len() {
            return Err(Error::UnexpectedResponse {
                provider: PROVIDER,
                message: format!(
                    "expected {} embeddings, got {}",
                    texts.len(),
                    vectors.len()
                ),
            });
        }
        Ok(vectors)
    }
}
