use std::sync::Arc;

use crate::errors::EngramResult;
use crate::models::{MemoryItem, Metadata};

/// Similarity-searchable long-term memory index.
///
/// Implementations must tolerate searches running concurrently with writes.
pub trait IVectorStore: Send + Sync {
    /// Insert or replace the item stored under `id`.
    fn add(&self, id: &str, text: &str, metadata: &Metadata) -> EngramResult<()>;

    /// Remove the given ids. Unknown ids are ignored.
    fn delete(&self, ids: &[String]) -> EngramResult<()>;

    /// Ranked search, best first.
    ///
    /// Effective top-k is `min(top_k, count, configured max)`; effective
    /// threshold is `max(configured threshold, min_similarity)`. Only results
    /// at or above the effective threshold are returned.
    fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> EngramResult<Vec<MemoryItem>>;

    /// Fetch one item by id, without similarity.
    fn get(&self, id: &str) -> EngramResult<Option<MemoryItem>>;

    /// Number of items in the collection.
    fn count(&self) -> EngramResult<usize>;
}

impl<T: IVectorStore + ?Sized> IVectorStore for Arc<T> {
    fn add(&self, id: &str, text: &str, metadata: &Metadata) -> EngramResult<()> { (**self).add(id, text, metadata) }
    fn delete(&self, ids: &[String]) -> EngramResult<()> { (**self).delete(ids) }
    fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> EngramResult<Vec<MemoryItem>> { (**self).search(query, top_k, min_similarity) }
    fn get(&self, id: &str) -> EngramResult<Option<MemoryItem>> { (**self).get(id) }
    fn count(&self) -> EngramResult<usize> { (**self).count() }
}
