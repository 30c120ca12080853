//! When a pass is allowed to run.

pub mod gate;
pub mod triggers;

pub use gate::PassGate;
pub use triggers::{GapTrigger, TriggerDecision};
