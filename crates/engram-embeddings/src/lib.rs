//! # engram-embeddings
//!
//! Embedding providers behind `IEmbeddingProvider`:
//!
//! ```text
//! create_provider(config)
//! ├── CachedEmbedder (moka, keyed by blake3 content hash)
//! │   ├── ApiEmbedder (OpenAI-compatible /embeddings)
//! │   └── TfIdfEmbedder (hashed TF-IDF, always available)
//! ```

pub mod cache;
pub mod providers;

pub use cache::CachedEmbedder;
pub use providers::{create_provider, ApiEmbedder, TfIdfEmbedder};
