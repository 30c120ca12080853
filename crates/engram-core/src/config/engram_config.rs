//! Top-level Engram configuration with layered resolution.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ContextMemoryConfig, EmbeddingConfig, EmbeddingProviderKind, LongMemoryConfig, OracleConfig,
    ShortMemoryConfig, StorageConfig, VectorConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ENGRAM_*`)
/// 2. Config file (TOML)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngramConfig {
    pub storage: StorageConfig,
    pub vector: VectorConfig,
    pub embedding: EmbeddingConfig,
    pub oracle: OracleConfig,
    pub context_memory: ContextMemoryConfig,
    pub long_memory: LongMemoryConfig,
    pub short_memory: ShortMemoryConfig,
}

impl EngramConfig {
    /// Load configuration from `path` (if given), then apply `ENGRAM_*`
    /// environment overrides, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply environment overrides through `lookup` (injected for testing).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ENGRAM_DB_PATH") {
            self.storage.db_path = v;
        }
        if let Some(v) = lookup("ENGRAM_ORACLE_MODEL") {
            self.oracle.model = v;
        }
        if let Some(v) = lookup("ENGRAM_ORACLE_BASE_URL") {
            self.oracle.base_url = v;
        }
        if let Some(v) = lookup("ENGRAM_ORACLE_API_KEY") {
            self.oracle.api_key = v;
        }
        if let Some(v) = lookup("ENGRAM_EMBEDDING_API_KEY") {
            self.embedding.api_key = v;
        }
        if let Some(v) = lookup("ENGRAM_EMBEDDING_PROVIDER") {
            self.embedding.provider = match v.to_ascii_lowercase().as_str() {
                "tfidf" => EmbeddingProviderKind::Tfidf,
                "api" => EmbeddingProviderKind::Api,
                _ => {
                    return Err(ConfigError::ValidationFailed {
                        field: "ENGRAM_EMBEDDING_PROVIDER".to_string(),
                        message: format!("unknown provider `{v}`"),
                    })
                }
            };
        }
        if let Some(v) = lookup("ENGRAM_SUMMARY_GAP") {
            self.context_memory.summary_gap = parse_env("ENGRAM_SUMMARY_GAP", &v)?;
        }
        if let Some(v) = lookup("ENGRAM_LONG_GAP") {
            self.long_memory.long_gap = parse_env("ENGRAM_LONG_GAP", &v)?;
        }
        if let Some(v) = lookup("ENGRAM_SHORT_WINDOW") {
            self.short_memory.short_window = parse_env("ENGRAM_SHORT_WINDOW", &v)?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.context_memory.summary_gap == 0 {
            return Err(invalid("context_memory.summary_gap", "must be at least 1"));
        }
        if self.long_memory.long_gap == 0 {
            return Err(invalid("long_memory.long_gap", "must be at least 1"));
        }
        if self.short_memory.short_window == 0 {
            return Err(invalid("short_memory.short_window", "must be at least 1"));
        }
        if self.vector.max_top_k == 0 {
            return Err(invalid("vector.max_top_k", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.vector.similarity_threshold) {
            return Err(invalid(
                "vector.similarity_threshold",
                "must be between 0.0 and 1.0",
            ));
        }
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be greater than 0"));
        }
        if !(0.0..=2.0).contains(&self.oracle.temperature) {
            return Err(invalid("oracle.temperature", "must be between 0.0 and 2.0"));
        }
        Ok(())
    }
}

fn parse_env(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::ValidationFailed {
        field: key.to_string(),
        message: format!("expected a non-negative integer, got `{value}`"),
    })
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "[REDACTED]"
    }
}

impl fmt::Display for EngramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config:")?;
        writeln!(f, "  storage: db_path={}", self.storage.db_path)?;
        writeln!(
            f,
            "  vector: collection={} max_top_k={} similarity_threshold={:.2} candidate_top_k={}",
            self.vector.collection,
            self.vector.max_top_k,
            self.vector.similarity_threshold,
            self.vector.candidate_top_k
        )?;
        writeln!(
            f,
            "  embedding: provider={:?} model={} base_url={} api_key={} dimensions={}",
            self.embedding.provider,
            self.embedding.model,
            self.embedding.base_url,
            redact(&self.embedding.api_key),
            self.embedding.dimensions
        )?;
        writeln!(
            f,
            "  oracle: model={} base_url={} api_key={} temperature={:.2}",
            self.oracle.model,
            self.oracle.base_url,
            redact(&self.oracle.api_key),
            self.oracle.temperature
        )?;
        writeln!(
            f,
            "  memory: summary_gap={} long_gap={} short_window={}",
            self.context_memory.summary_gap,
            self.long_memory.long_gap,
            self.short_memory.short_window
        )
    }
}
