//! Fixed oracle instructions and the user-content builders that pair with them.

use std::fmt::Write;

use engram_core::models::{Fact, InteractionRecord, MemoryItem, Metadata, SummaryState};

/// Instruction for folding new turns into the rolling summary.
pub const FOLD_SUMMARY_INSTRUCTION: &str = "\
You maintain a running summary of a conversation between a user and an assistant.
You receive the summary so far and the turns that happened after it.
Rewrite the summary so it also covers the new turns.
Keep names, preferences, decisions, open questions and the current topic.
Drop greetings and filler. Write in the third person, at most 200 words.
Reply with the summary text only.";

/// Instruction for distilling durable facts from a window of turns.
pub const FACT_EXTRACTION_INSTRUCTION: &str = r#"You extract durable facts from a conversation for long-term memory.
Only keep information that is likely to matter in future conversations: identities,
relationships, preferences, plans, commitments, biographical details, stated opinions.
Ignore small talk and anything only relevant to the current exchange.
The conversation summary is background and may not relate to the new turns.
Reply with JSON only, no prose, in exactly this shape:
{"facts": [{"content": "<one short assertion>", "appearTime": "<when it was said>", "about": "<who or what it concerns>"}]}
If there is nothing worth remembering reply with {"facts": []}."#;

/// Instruction for reconciling new facts against retrieved memories.
pub const RECONCILE_INSTRUCTION: &str = r#"You keep a long-term memory store consistent.
You receive newly extracted facts and existing memories that may be related.
For every new fact and every existing memory decide one event:
- ADD: the fact is new information. Give its text; the id is ignored.
- UPDATE: the fact refines or corrects an existing memory. Keep that memory's id, give the merged text.
- DELETE: an existing memory is contradicted and should be forgotten. Give its id.
- NONE: the fact or memory is already represented. No change.
Only use ids that appear in the existing memories.
Reply with JSON only, no prose, in exactly this shape:
{"memory": [{"id": "<id or empty>", "text": "<memory text>", "meta": {"<key>": "<value>"}, "event": "ADD|UPDATE|DELETE|NONE"}]}"#;

const NO_SUMMARY: &str = "(none yet)";

/// Prior summary plus the turns to fold in.
pub fn fold_summary_input(prior_summary: &str, records: &[InteractionRecord]) -> String {
    let mut out = String::from("# Summary so far\n");
    push_or_placeholder(&mut out, prior_summary, NO_SUMMARY);
    out.push_str("\n# New turns\n");
    for record in records {
        let _ = writeln!(out, "{}: {}", record.role, record.content);
    }
    out
}

/// Current summary as background, then the window with timestamps.
pub fn fact_extraction_input(summary: &SummaryState, window: &[InteractionRecord]) -> String {
    let mut out = String::from("# Conversation summary (background only)\n");
    push_or_placeholder(&mut out, &summary.summary, NO_SUMMARY);
    out.push_str("\n# Turns to extract from\n");
    for record in window {
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.role,
            record.content
        );
    }
    out
}

/// New facts followed by the deduplicated candidate memories.
pub fn reconcile_input(facts: &[Fact], candidates: &[MemoryItem]) -> String {
    let mut out = String::from("# New facts\n");
    for fact in facts {
        let _ = write!(out, "- {}", fact.content);
        if !fact.appear_time.is_empty() || !fact.about.is_empty() {
            let _ = write!(out, " (appeared: {}, about: {})", fact.appear_time, fact.about);
        }
        out.push('\n');
    }
    out.push_str("\n# Existing memories\n");
    if candidates.is_empty() {
        out.push_str("(none)\n");
    }
    for item in candidates {
        let _ = writeln!(
            out,
            "- id: {} | text: {} | meta: {}",
            item.id,
            item.text,
            render_metadata(&item.metadata)
        );
    }
    out
}

/// `{k=v, k2=v2}` in key order.
pub fn render_metadata(metadata: &Metadata) -> String {
    let pairs: Vec<String> = metadata.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{{{}}}", pairs.join(", "))
}

fn push_or_placeholder(out: &mut String, text: &str, placeholder: &str) {
    let text = text.trim();
    out.push_str(if text.is_empty() { placeholder } else { text });
    out.push('\n');
}
