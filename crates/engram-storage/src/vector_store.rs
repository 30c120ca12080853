//! Embedding-backed long-term memory index stored next to the interaction log.

use std::sync::Arc;

use engram_core::config::VectorConfig;
use engram_core::errors::{EmbeddingError, EngramResult};
use engram_core::models::{MemoryItem, Metadata};
use engram_core::traits::{IEmbeddingProvider, IVectorStore};

use crate::queries::memory_item_ops;
use crate::StorageEngine;

/// Vector store over the `memory_items` table.
///
/// Embeddings are computed outside the write lock. Search is a brute-force
/// cosine scan over one collection.
pub struct SqliteVectorStore {
    storage: Arc<StorageEngine>,
    embedder: Arc<dyn IEmbeddingProvider>,
    collection: String,
    max_top_k: usize,
    similarity_threshold: f32,
}

impl SqliteVectorStore {
    pub fn new(
        storage: Arc<StorageEngine>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: &VectorConfig,
    ) -> Self {
        Self {
            storage,
            embedder,
            collection: config.collection.clone(),
            max_top_k: config.max_top_k,
            similarity_threshold: config.similarity_threshold,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn embed_checked(&self, text: &str) -> EngramResult<Vec<f32>> {
        let embedding = self.embedder.embed(text)?;
        let expected = self.embedder.dimensions();
        if embedding.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            }
            .into());
        }
        Ok(embedding)
    }
}

impl IVectorStore for SqliteVectorStore {
    fn add(&self, id: &str, text: &str, metadata: &Metadata) -> EngramResult<()> {
        let embedding = self.embed_checked(text)?;
        self.storage.with_writer(|conn| {
            memory_item_ops::upsert_item(conn, &self.collection, id, text, metadata, &embedding)
        })
    }

    fn delete(&self, ids: &[String]) -> EngramResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let removed = self
            .storage
            .with_writer(|conn| memory_item_ops::delete_items(conn, &self.collection, ids))?;
        if removed < ids.len() {
            tracing::debug!(
                requested = ids.len(),
                removed = removed,
                "delete skipped unknown ids"
            );
        }
        Ok(())
    }

    fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> EngramResult<Vec<MemoryItem>> {
        let limit = top_k.min(self.max_top_k);
        if limit == 0 || self.count()? == 0 {
            return Ok(Vec::new());
        }
        let threshold = self.similarity_threshold.max(min_similarity);
        let query_embedding = self.embed_checked(query)?;
        self.storage.with_reader(|conn| {
            memory_item_ops::search_items(conn, &self.collection, &query_embedding, limit, threshold)
        })
    }

    fn get(&self, id: &str) -> EngramResult<Option<MemoryItem>> {
        self.storage
            .with_reader(|conn| memory_item_ops::get_item(conn, &self.collection, id))
    }

    fn count(&self) -> EngramResult<usize> {
        self.storage
            .with_reader(|conn| memory_item_ops::count_items(conn, &self.collection))
    }
}
