use std::fmt::Write;

use engram_core::models::{InteractionRecord, MemoryItem, SummaryState};

pub const HEADING_SUMMARY: &str = "# Context summary";
pub const HEADING_LONG_TERM: &str = "# Long-term memory";
pub const HEADING_RECENT: &str = "# Recent conversation";
pub const HEADING_INPUT: &str = "# Current user input";

pub const NO_SUMMARY: &str = "(no summary yet)";
pub const NO_LONG_TERM: &str = "(no long-term memory)";
pub const NO_RECENT: &str = "(no recent conversation)";

pub(super) fn summary_block(out: &mut String, summary: &SummaryState) {
    let _ = writeln!(out, "{HEADING_SUMMARY}");
    let text = summary.summary.trim();
    let _ = writeln!(out, "{}", if text.is_empty() { NO_SUMMARY } else { text });
}

pub(super) fn long_term_block(out: &mut String, items: &[MemoryItem]) {
    let _ = writeln!(out, "{HEADING_LONG_TERM}");
    if items.is_empty() {
        let _ = writeln!(out, "{NO_LONG_TERM}");
        return;
    }
    for item in items {
        let _ = write!(out, "- {}", item.text.trim());
        if !item.metadata.is_empty() {
            let meta: Vec<String> = item
                .metadata
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            let _ = write!(out, " | meta: {{{}}}", meta.join(", "));
        }
        if let Some(similarity) = item.similarity {
            let _ = write!(out, " | similarity: {similarity:.2}");
        }
        out.push('\n');
    }
}

pub(super) fn recent_block(out: &mut String, window: &[InteractionRecord]) {
    let _ = writeln!(out, "{HEADING_RECENT}");
    if window.is_empty() {
        let _ = writeln!(out, "{NO_RECENT}");
        return;
    }
    for record in window {
        let _ = writeln!(out, "{}: {}", record.role, record.content);
    }
}

pub(super) fn input_block(out: &mut String, active_input: &str) {
    let _ = writeln!(out, "{HEADING_INPUT}");
    let _ = writeln!(out, "user: {active_input}");
}
