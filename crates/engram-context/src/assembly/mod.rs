//! Layered prompt assembly.
//!
//! Block order is fixed: summary, long-term memory, recent conversation,
//! current input. Empty blocks keep their heading and show a marker line.

mod blocks;

use engram_core::models::{InteractionRecord, MemoryItem, SummaryState};
use engram_observability::assemble_span;

pub use blocks::{
    HEADING_INPUT, HEADING_LONG_TERM, HEADING_RECENT, HEADING_SUMMARY, NO_LONG_TERM, NO_RECENT,
    NO_SUMMARY,
};

/// Compose the prompt for the active user turn. Pure: same inputs, same text.
pub fn assemble(
    summary: &SummaryState,
    long_term: &[MemoryItem],
    window: &[InteractionRecord],
    active_input: &str,
) -> String {
    let span = assemble_span!(window.len(), long_term.len());
    let _entered = span.enter();

    let mut out = String::new();
    blocks::summary_block(&mut out, summary);
    out.push('\n');
    blocks::long_term_block(&mut out, long_term);
    out.push('\n');
    blocks::recent_block(&mut out, window);
    out.push('\n');
    blocks::input_block(&mut out, active_input);
    out
}
