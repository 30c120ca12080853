use std::sync::Arc;

use crate::errors::EngramResult;
use crate::models::{InteractionRecord, NewInteraction};

/// Append-only log of conversation turns.
///
/// Reads never fail on an empty result; they return zero records.
pub trait IInteractionLog: Send + Sync {
    /// Append a turn and return the id the log assigned to it.
    fn append(&self, record: &NewInteraction) -> EngramResult<i64>;

    /// The most recent `n` records, oldest-first.
    fn tail(&self, n: usize) -> EngramResult<Vec<InteractionRecord>>;

    /// Up to `limit` records with `id > watermark`, oldest-first.
    fn since(&self, watermark: i64, limit: usize) -> EngramResult<Vec<InteractionRecord>>;

    /// Number of records with `id > watermark`.
    fn count_since(&self, watermark: i64) -> EngramResult<usize>;
}

impl<T: IInteractionLog + ?Sized> IInteractionLog for Arc<T> {
    fn append(&self, record: &NewInteraction) -> EngramResult<i64> { (**self).append(record) }
    fn tail(&self, n: usize) -> EngramResult<Vec<InteractionRecord>> { (**self).tail(n) }
    fn since(&self, watermark: i64, limit: usize) -> EngramResult<Vec<InteractionRecord>> { (**self).since(watermark, limit) }
    fn count_since(&self, watermark: i64) -> EngramResult<usize> { (**self).count_since(watermark) }
}
