use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::UNSET_WATERMARK;

/// Rolling conversation summary plus the id of the last record folded into it.
///
/// `last_summary_id` never decreases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryState {
    pub summary: String,
    pub last_summary_id: i64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for SummaryState {
    fn default() -> Self {
        Self {
            summary: String::new(),
            last_summary_id: UNSET_WATERMARK,
            updated_at: None,
        }
    }
}

impl SummaryState {
    /// True until the first summarization pass has persisted something.
    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty()
    }

    /// The state after folding records up to `last_id` into `summary`.
    pub fn advanced(summary: String, last_id: i64) -> Self {
        Self {
            summary,
            last_summary_id: last_id,
            updated_at: Some(Utc::now()),
        }
    }
}
