//! # engram-consolidation
//!
//! The two background engines that derive state from the interaction log:
//!
//! - [`SummarizationEngine`] folds unsummarized turns into a rolling summary.
//! - [`LongTermEngine`] distills turns into facts, reconciles them against
//!   stored memories and applies the resulting ADD/UPDATE/DELETE/NONE events.
//!
//! Each engine owns one watermark and one [`PassGate`]. Passes are gated by a
//! [`GapTrigger`] and never advance a watermark unless the pass succeeded.

pub mod long_term;
pub mod outcome;
pub mod parse;
pub mod prompts;
pub mod scheduling;
pub mod stats;
pub mod summarization;

pub use long_term::LongTermEngine;
pub use outcome::{ApplyReport, ConsolidationOutcome, SummaryOutcome};
pub use scheduling::{GapTrigger, PassGate, TriggerDecision};
pub use stats::{PassStats, PassStatsSnapshot};
pub use summarization::SummarizationEngine;
