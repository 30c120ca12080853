//! # engram-session
//!
//! [`MemoryOrchestrator`] is the façade a chat loop talks to: it assembles
//! the prompt for each user turn, records every turn, and fires the
//! summarization and long-term passes in the background after each reply.

pub mod background;
pub mod orchestrator;

pub use background::BackgroundTasks;
pub use orchestrator::MemoryOrchestrator;
