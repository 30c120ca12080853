//! # engram-core
//!
//! Foundation crate for the Engram memory system.
//! Defines the interaction/state/memory types, collaborator traits, errors,
//! config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::EngramConfig;
pub use errors::{EngramError, EngramResult};
pub use models::{
    EventKind, Fact, InteractionRecord, LongTermWatermark, MemoryEvent, MemoryItem, Metadata,
    NewInteraction, Role, SummaryState,
};
