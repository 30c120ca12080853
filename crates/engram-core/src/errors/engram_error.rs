use super::{ConfigError, EmbeddingError, OracleError, OracleFormatError, StorageError};

/// Top-level error type. Every subsystem error converts into this via `From`.
#[derive(Debug, thiserror::Error)]
pub enum EngramError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("oracle error: {0}")]
    OracleError(#[from] OracleError),

    #[error("oracle format error: {0}")]
    OracleFormatError(#[from] OracleFormatError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Background passes that panicked instead of returning.
    #[error("{panicked} background pass(es) panicked")]
    BackgroundPanicked { panicked: usize },
}

impl EngramError {
    /// True for relational or vector store I/O failures (embedding the
    /// query is part of a vector store round trip).
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::StorageError(_) | Self::EmbeddingError(_))
    }

    /// True when the oracle could not be reached or refused the request.
    pub fn is_oracle_error(&self) -> bool {
        matches!(self, Self::OracleError(_))
    }

    /// True when the oracle replied with something that did not parse.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::OracleFormatError(_))
    }
}

/// Convenience alias used across the workspace.
pub type EngramResult<T> = Result<T, EngramError>;
