//! Configuration record consumed by the factory.
//!
//! The record mirrors the upstream key-value configuration store; serde
//! aliases accept the store's ALL-CAPS keys directly. No field is checked
//! for well-formedness here — only credential *presence* is interpreted,
//! everything else surfaces when a request is attempted.

use serde::Deserialize;

/// Default endpoint for the cloud provider.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Historical placeholder written by the configuration UI when the key
/// field was left blank (an HTML-escaped non-breaking space). Treated as
/// "no credential configured".
pub const PLACEHOLDER_API_KEY: &str = "&nbsp;";

/// Provider configuration, consumed read-only.
///
/// At most one provider is active at a time; activity is determined solely
/// by [`ProviderConfig::cloud_api_key`]. The `primary_model` and
/// `secondary_model` fields are carried for callers that route by model
/// tier — nothing in this crate interprets them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    #[serde(alias = "OLLAMA_BASE_URL")]
    pub ollama_base_url: String,
    #[serde(alias = "OPENAI_API_KEY")]
    pub openai_api_key: String,
    #[serde(alias = "OPENAI_BASE_URL")]
    pub openai_base_url: String,
    #[serde(alias = "PRIMARY_MODEL")]
    pub primary_model: String,
    #[serde(alias = "SECONDARY_MODEL")]
    pub secondary_model: String,
    #[serde(alias = "EMBEDDING_MODEL")]
    pub embedding_model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: String::new(),
            openai_api_key: String::new(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            primary_model: String::new(),
            secondary_model: String::new(),
            embedding_model: String::new(),
        }
    }
}

impl ProviderConfig {
    /// The cloud API key, if one is actually configured.
    ///
    /// A key that is empty, whitespace-only, or equal to
    /// [`PLACEHOLDER_API_KEY`] counts as absent and routes requests to the
    /// local provider.
    pub fn cloud_api_key(&self) -> Option<&str> {
        let key = self.openai_api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            None
        } else {
            Some(key)
        }
    }

    /// Cloud base URL, falling back to the vendor's public endpoint when
    /// the configured value is blank.
    pub fn cloud_base_url(&self) -> &str {
        let url = self.openai_base_url.trim();
        if url.is_empty() {
            DEFAULT_OPENAI_BASE_URL
        } else {
            url
        }
    }
}
