use serde::{Deserialize, Serialize};

use super::defaults;

/// Which embedding backend to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// Local hashed TF-IDF vectors, no network.
    Tfidf,
    /// OpenAI-compatible `/embeddings` endpoint.
    Api,
}

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub dimensions: usize,
    /// Entries kept in the in-memory embedding cache. 0 disables it.
    pub cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::Tfidf,
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
