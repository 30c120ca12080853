use serde::{Deserialize, Serialize};

use super::defaults;

/// Rolling-summary tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextMemoryConfig {
    /// Unsummarized turns required before a summarization pass runs.
    pub summary_gap: usize,
}

impl Default for ContextMemoryConfig {
    fn default() -> Self {
        Self {
            summary_gap: defaults::DEFAULT_SUMMARY_GAP,
        }
    }
}

/// Long-term fact tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LongMemoryConfig {
    /// Unconsolidated turns required before a consolidation pass runs.
    pub long_gap: usize,
}

impl Default for LongMemoryConfig {
    fn default() -> Self {
        Self {
            long_gap: defaults::DEFAULT_LONG_GAP,
        }
    }
}

/// Recent-turns tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortMemoryConfig {
    /// Number of most recent turns replayed verbatim into the prompt.
    pub short_window: usize,
}

impl Default for ShortMemoryConfig {
    fn default() -> Self {
        Self {
            short_window: defaults::DEFAULT_SHORT_WINDOW,
        }
    }
}
