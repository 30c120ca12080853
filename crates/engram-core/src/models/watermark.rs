use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::UNSET_WATERMARK;

/// Id of the last record already distilled into the long-term index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermWatermark {
    pub last_extraction_id: i64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for LongTermWatermark {
    fn default() -> Self {
        Self {
            last_extraction_id: UNSET_WATERMARK,
            updated_at: None,
        }
    }
}

impl LongTermWatermark {
    pub fn at(last_extraction_id: i64) -> Self {
        Self {
            last_extraction_id,
            updated_at: Some(Utc::now()),
        }
    }
}
