//! Data model shared by every crate: interaction records, derived-state
//! singletons, long-term memory items and the transient merge types.

pub mod fact;
pub mod interaction;
pub mod memory_event;
pub mod memory_item;
pub mod summary_state;
pub mod watermark;

pub use fact::Fact;
pub use interaction::{InteractionRecord, NewInteraction, Role};
pub use memory_event::{EventKind, MemoryEvent};
pub use memory_item::{MemoryItem, Metadata};
pub use summary_state::SummaryState;
pub use watermark::LongTermWatermark;
