//! # engram-storage
//!
//! SQLite persistence for the memory engines: the append-only interaction
//! log, the two derived-state singletons, and a brute-force cosine vector
//! store over embeddings kept in the same database.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod vector_store;

pub use engine::StorageEngine;
pub use vector_store::SqliteVectorStore;

use engram_core::errors::{EngramError, StorageError};

/// Wrap a rusqlite (or other) failure message as a storage error.
pub(crate) fn to_storage_err(message: String) -> EngramError {
    EngramError::StorageError(StorageError::SqliteError { message })
}

/// Poisoned-lock error for the named connection.
pub(crate) fn lock_poisoned(resource: &str) -> EngramError {
    EngramError::StorageError(StorageError::LockPoisoned {
        resource: resource.to_string(),
    })
}
