//! Batch text-to-vector embedding behind one callable contract.
//!
//! The consumer is a synchronous vector-store callback, so both
//! implementations use the blocking transport. An empty input batch is an
//! explicit edge case: it returns an empty result without touching the
//! network.

pub mod ollama;
pub mod openai;

use crate::Result;

pub use ollama::OllamaEmbeddingFunction;
pub use openai::OpenAiEmbeddingFunction;

/// Batch embedding contract.
///
/// The output is order- and length-preserving: vector `i` embeds text `i`.
/// A whole batch either succeeds or fails; no shortened result is ever
/// returned.
pub trait EmbeddingFunction: Send + Sync {
    /// Identifier of the provider serving this function.
    fn provider_id(&self) -> &'static str;

    /// Embed a batch of texts, one vector per input, same order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
