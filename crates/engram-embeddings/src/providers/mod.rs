//! Provider construction from configuration.

pub mod api_provider;
pub mod tfidf;

pub use api_provider::ApiEmbedder;
pub use tfidf::TfIdfEmbedder;

use std::sync::Arc;

use engram_core::config::{EmbeddingConfig, EmbeddingProviderKind};
use engram_core::errors::EngramResult;
use engram_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

use crate::cache::CachedEmbedder;

/// Build the configured provider, wrapped in a cache when `cache_size > 0`.
///
/// An `api` provider without an API key falls back to TF-IDF.
pub fn create_provider(config: &EmbeddingConfig) -> EngramResult<Arc<dyn IEmbeddingProvider>> {
    let base: Arc<dyn IEmbeddingProvider> = match config.provider {
        EmbeddingProviderKind::Api if config.api_key.is_empty() => {
            warn!("API embedding provider configured without an api_key; using TF-IDF");
            Arc::new(TfIdfEmbedder::new(config.dimensions))
        }
        EmbeddingProviderKind::Api => {
            info!(provider = "api", model = %config.model, "embedding provider configured");
            Arc::new(ApiEmbedder::from_config(config)?)
        }
        EmbeddingProviderKind::Tfidf => {
            info!(provider = "tfidf", "using TF-IDF embedding provider");
            Arc::new(TfIdfEmbedder::new(config.dimensions))
        }
    };

    if config.cache_size == 0 {
        return Ok(base);
    }
    Ok(Arc::new(CachedEmbedder::new(base, config.cache_size)))
}
