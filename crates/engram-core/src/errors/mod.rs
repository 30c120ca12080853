//! Error handling for Engram.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod embedding_error;
pub mod engram_error;
pub mod oracle_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use engram_error::{EngramError, EngramResult};
pub use oracle_error::{OracleError, OracleFormatError};
pub use storage_error::StorageError;
