use serde::{Deserialize, Serialize};

use super::defaults;

/// Reasoning oracle (chat completion endpoint) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub temperature: f32,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_ORACLE_MODEL.to_string(),
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            temperature: defaults::DEFAULT_TEMPERATURE,
            timeout_secs: defaults::DEFAULT_ORACLE_TIMEOUT_SECS,
        }
    }
}
