//! Provider selection and adapter construction.
//!
//! Each function inspects the configuration once, independently, and
//! returns an adapter bound to the selected provider. The rule is the
//! same everywhere: a configured cloud credential wins, otherwise the
//! local provider is used. Required fields for the selected provider are
//! validated here, at construction time, before any network attempt.
//!
//! Because each call re-evaluates the rule on the configuration it is
//! given, two calls made around a configuration change may disagree;
//! treat every call as an independent, atomic decision point.

use tracing::info;

use crate::config::ProviderConfig;
use crate::embeddings::{EmbeddingFunction, OllamaEmbeddingFunction, OpenAiEmbeddingFunction};
use crate::providers::{
    AsyncChatApi, AsyncOllamaClient, AsyncOpenAiClient, ChatApi, OllamaClient, OpenAiClient,
};
use crate::Result;

/// Default cloud embedding model when the configuration leaves it blank.
const DEFAULT_OPENAI_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Construct a blocking chat client for the active provider.
pub fn chat_client(config: &ProviderConfig) -> Result<Box<dyn ChatApi>> {
    if let Some(api_key) = config.cloud_api_key() {
        info!(provider = "openai", "using cloud chat client");
        Ok(Box::new(OpenAiClient::with_base_url(
            api_key,
            config.cloud_base_url(),
        )?))
    } else {
        info!(provider = "ollama", "using local chat client");
        Ok(Box::new(OllamaClient::new(&config.ollama_base_url)?))
    }
}

/// Construct a non-blocking chat client for the active provider.
pub fn async_chat_client(config: &ProviderConfig) -> Result<Box<dyn AsyncChatApi>> {
    if let Some(api_key) = config.cloud_api_key() {
        info!(provider = "openai", "using cloud chat client");
        Ok(Box::new(AsyncOpenAiClient::with_base_url(
            api_key,
            config.cloud_base_url(),
        )?))
    } else {
        info!(provider = "ollama", "using local chat client");
        Ok(Box::new(AsyncOllamaClient::new(&config.ollama_base_url)?))
    }
}

/// Construct a batch embedding function for the active provider.
///
/// The cloud variant falls back to a stock embedding model when the
/// configuration leaves the field blank; the local variant has no sane
/// default, so a blank model is a configuration error there.
pub fn embedding_function(config: &ProviderConfig) -> Result<Box<dyn EmbeddingFunction>> {
    if let Some(api_key) = config.cloud_api_key() {
        let model = match config.embedding_model.trim() {
            "" => DEFAULT_OPENAI_EMBEDDING_MODEL,
            model => model,
        };
        info!(provider = "openai", model, "using cloud embedding function");
        Ok(Box::new(OpenAiEmbeddingFunction::new(
            api_key,
            model,
            config.cloud_base_url(),
        )?))
    } else {
        info!(
            provider = "ollama",
            model = %config.embedding_model,
            "using local embedding function"
        );
        Ok(Box::new(OllamaEmbeddingFunction::new(
            &config.ollama_base_url,
            &config.embedding_model,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn local_config() -> ProviderConfig {
        ProviderConfig {
            ollama_base_url: "http://localhost:11434".into(),
            embedding_model: "nomic-embed-text".into(),
            ..Default::default()
        }
    }

    fn cloud_config() -> ProviderConfig {
        ProviderConfig {
            openai_api_key: "sk-test".into(),
            ..Default::default()
        }
    }

    #[test]
    fn cloud_key_selects_cloud_everywhere() {
        let config = cloud_config();
        assert_eq!(chat_client(&config).unwrap().provider_id(), "openai");
        assert_eq!(async_chat_client(&config).unwrap().provider_id(), "openai");
        assert_eq!(embedding_function(&config).unwrap().provider_id(), "openai");
    }

    #[test]
    fn absent_key_selects_local_everywhere() {
        let config = local_config();
        assert_eq!(chat_client(&config).unwrap().provider_id(), "ollama");
        assert_eq!(async_chat_client(&config).unwrap().provider_id(), "ollama");
        assert_eq!(embedding_function(&config).unwrap().provider_id(), "ollama");
    }

    #[test]
    fn placeholder_key_routes_local() {
        let config = ProviderConfig {
            openai_api_key: "&nbsp;".into(),
            ..local_config()
        };
        assert_eq!(chat_client(&config).unwrap().provider_id(), "ollama");
    }

    #[test]
    fn local_selection_with_blank_url_fails_at_construction() {
        let config = ProviderConfig {
            embedding_model: "nomic-embed-text".into(),
            ..Default::default()
        };
        assert!(matches!(
            chat_client(&config).err().unwrap(),
            Error::Configuration { .. }
        ));
        assert!(matches!(
            async_chat_client(&config).err().unwrap(),
            Error::Configuration { .. }
        ));
        assert!(matches!(
            embedding_function(&config).err().unwrap(),
            Error::Configuration { .. }
        ));
    }

    #[test]
    fn local_embedding_requires_model() {
        let config = ProviderConfig {
            embedding_model: String::new(),
            ..local_config()
        };
        assert!(matches!(
            embedding_function(&config).err().unwrap(),
            Error::Configuration { .. }
        ));
    }
}
