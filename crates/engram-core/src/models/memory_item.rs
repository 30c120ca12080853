use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// String-keyed item metadata. Ordered so rendering is deterministic.
pub type Metadata = BTreeMap<String, String>;

/// A durable long-term memory held by the vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: Metadata,
    /// Cosine similarity to the query. Only set on search results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

impl MemoryItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata,
            similarity: None,
        }
    }

    pub fn with_similarity(mut self, similarity: f32) -> Self {
        self.similarity = Some(similarity);
        self
    }
}
