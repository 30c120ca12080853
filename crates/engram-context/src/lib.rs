//! # engram-context
//!
//! Foreground read side of the memory: the short-term window over the tail
//! of the interaction log, and the pure assembler that lays summary,
//! long-term memories, recent turns and the active input out into one prompt.

pub mod assembly;
pub mod window;

pub use assembly::assemble;
pub use window::ShortTermWindow;
