//! Long-term consolidation: extract, retrieve, reconcile, apply, advance.

pub mod apply;
pub mod engine;

pub use apply::{apply_events, memory_id_for};
pub use engine::LongTermEngine;
