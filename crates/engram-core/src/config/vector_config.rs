use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Collection name; several collections can share one database.
    pub collection: String,
    /// Hard ceiling on results per search.
    pub max_top_k: usize,
    /// Floor on similarity; requests may raise it but never lower it.
    pub similarity_threshold: f32,
    /// Candidates fetched per extracted fact during reconciliation.
    pub candidate_top_k: usize,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            collection: defaults::DEFAULT_COLLECTION.to_string(),
            max_top_k: defaults::DEFAULT_MAX_TOP_K,
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            candidate_top_k: defaults::DEFAULT_CANDIDATE_TOP_K,
        }
    }
}
