//! Short-term window: the last N turns, verbatim.

use std::sync::Arc;

use engram_core::errors::EngramResult;
use engram_core::models::InteractionRecord;
use engram_core::traits::IInteractionLog;

/// Reads the most recent turns from the interaction log. Never writes.
pub struct ShortTermWindow {
    log: Arc<dyn IInteractionLog>,
    default_size: usize,
}

impl ShortTermWindow {
    pub fn new(log: Arc<dyn IInteractionLog>, default_size: usize) -> Self {
        Self { log, default_size }
    }

    /// The most recent `size` records, oldest-first.
    pub fn get_window(&self, size: usize) -> EngramResult<Vec<InteractionRecord>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        self.log.tail(size)
    }

    /// The window at the configured size.
    pub fn current(&self) -> EngramResult<Vec<InteractionRecord>> {
        self.get_window(self.default_size)
    }

    pub fn default_size(&self) -> usize {
        self.default_size
    }
}
