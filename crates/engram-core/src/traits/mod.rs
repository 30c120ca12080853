//! Collaborator contracts consumed by the consolidation core.
//!
//! All traits are synchronous and `Send + Sync` so implementations can be
//! shared behind `Arc` between the foreground path and background passes.

pub mod embedding;
pub mod interaction_log;
pub mod oracle;
pub mod state_store;
pub mod vector_store;

pub use embedding::IEmbeddingProvider;
pub use interaction_log::IInteractionLog;
pub use oracle::IReasoningOracle;
pub use state_store::IStateStore;
pub use vector_store::IVectorStore;
