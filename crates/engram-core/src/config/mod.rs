//! Configuration system for Engram.
//! TOML-based, resolution: env > file > compiled defaults.

pub mod defaults;
pub mod embedding_config;
pub mod engram_config;
pub mod memory_config;
pub mod oracle_config;
pub mod storage_config;
pub mod vector_config;

pub use embedding_config::{EmbeddingConfig, EmbeddingProviderKind};
pub use engram_config::EngramConfig;
pub use memory_config::{ContextMemoryConfig, LongMemoryConfig, ShortMemoryConfig};
pub use oracle_config::OracleConfig;
pub use storage_config::StorageConfig;
pub use vector_config::VectorConfig;
