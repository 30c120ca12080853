//! In-memory embedding cache using moka.
//!
//! Keys are blake3 content hashes, values are embedding vectors.

use std::sync::Arc;
use std::time::Duration;

use engram_core::errors::EngramResult;
use engram_core::traits::IEmbeddingProvider;
use moka::sync::Cache;

/// Wraps any provider and memoizes its vectors.
pub struct CachedEmbedder {
    inner: Arc<dyn IEmbeddingProvider>,
    cache: Cache<String, Vec<f32>>,
    name: String,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn IEmbeddingProvider>, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        let name = format!("cached:{}", inner.name());
        Self { inner, cache, name }
    }

    fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    /// Number of cached entries (eventually consistent).
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IEmbeddingProvider for CachedEmbedder {
    fn embed(&self, text: &str) -> EngramResult<Vec<f32>> {
        let key = Self::key(text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let embedding = self.inner.embed(text)?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    fn embed_batch(&self, texts: &[String]) -> EngramResult<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| Self::key(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cache.get(k)).collect();

        let missing: Vec<usize> = (0..texts.len()).filter(|&i| out[i].is_none()).collect();
        if !missing.is_empty() {
            let batch: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
            let fresh = self.inner.embed_batch(&batch)?;
            for (&i, embedding) in missing.iter().zip(fresh) {
                self.cache.insert(keys[i].clone(), embedding.clone());
                out[i] = Some(embedding);
            }
        }
        Ok(out.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}
