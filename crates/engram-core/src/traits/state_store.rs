use std::sync::Arc;

use crate::errors::EngramResult;
use crate::models::{LongTermWatermark, SummaryState};

/// Durable home of the two derived-state singletons.
///
/// Each read is a single consistent snapshot of its row; each save is a
/// single-row upsert.
pub trait IStateStore: Send + Sync {
    /// Current summary state, or the default if nothing was ever saved.
    fn summary_state(&self) -> EngramResult<SummaryState>;
    fn save_summary_state(&self, state: &SummaryState) -> EngramResult<()>;

    /// Current long-term watermark, or the default if nothing was ever saved.
    fn long_term_watermark(&self) -> EngramResult<LongTermWatermark>;
    fn save_long_term_watermark(&self, watermark: &LongTermWatermark) -> EngramResult<()>;
}

impl<T: IStateStore + ?Sized> IStateStore for Arc<T> {
    fn summary_state(&self) -> EngramResult<SummaryState> { (**self).summary_state() }
    fn save_summary_state(&self, state: &SummaryState) -> EngramResult<()> { (**self).save_summary_state(state) }
    fn long_term_watermark(&self) -> EngramResult<LongTermWatermark> { (**self).long_term_watermark() }
    fn save_long_term_watermark(&self, watermark: &LongTermWatermark) -> EngramResult<()> { (**self).save_long_term_watermark(watermark) }
}
