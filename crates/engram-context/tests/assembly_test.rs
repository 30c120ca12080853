//! Context assembly layout.

use chrono::{TimeZone, Utc};
use engram_context::assembly::{NO_LONG_TERM, NO_RECENT, NO_SUMMARY};
use engram_context::assemble;
use engram_core::models::{
    InteractionRecord, MemoryItem, Metadata, NewInteraction, Role, SummaryState,
};

fn record(id: i64, role: Role, content: &str) -> InteractionRecord {
    let mut rec = NewInteraction::new(role, content).into_record(id);
    rec.created_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    rec
}

#[test]
fn full_layout() {
    let summary = SummaryState::advanced("Ana is moving to Porto.".to_string(), 4);
    let mut meta = Metadata::new();
    meta.insert("about".to_string(), "user".to_string());
    meta.insert("source_window".to_string(), "4".to_string());
    let long_term = vec![
        MemoryItem::new("m1", "User's name is Ana", meta).with_similarity(0.873),
        MemoryItem::new("m2", "User likes tea", Metadata::new()).with_similarity(0.5),
    ];
    let window = vec![
        record(5, Role::User, "Where should I live?"),
        record(6, Role::Assistant, "Ribeira is lovely."),
    ];

    let prompt = assemble(&summary, &long_term, &window, "Is it expensive?");
    assert_eq!(
        prompt,
        "# Context summary\n\
         Ana is moving to Porto.\n\
         \n\
         # Long-term memory\n\
         - User's name is Ana | meta: {about=user, source_window=4} | similarity: 0.87\n\
         - User likes tea | similarity: 0.50\n\
         \n\
         # Recent conversation\n\
         user: Where should I live?\n\
         assistant: Ribeira is lovely.\n\
         \n\
         # Current user input\n\
         user: Is it expensive?\n"
    );
}

#[test]
fn empty_blocks_keep_their_place() {
    let prompt = assemble(&SummaryState::default(), &[], &[], "hello");
    let summary_at = prompt.find(NO_SUMMARY).unwrap();
    let long_term_at = prompt.find(NO_LONG_TERM).unwrap();
    let recent_at = prompt.find(NO_RECENT).unwrap();
    let input_at = prompt.find("user: hello").unwrap();
    assert!(summary_at < long_term_at);
    assert!(long_term_at < recent_at);
    assert!(recent_at < input_at);
}

#[test]
fn tool_turns_are_labelled() {
    let window = vec![record(1, Role::Tool, "{\"temp\": 21}")];
    let prompt = assemble(&SummaryState::default(), &[], &window, "and tomorrow?");
    assert!(prompt.contains("tool: {\"temp\": 21}\n"));
}

#[test]
fn item_without_similarity_omits_score() {
    let items = vec![MemoryItem::new("m1", "User owns a bike", Metadata::new())];
    let prompt = assemble(&SummaryState::default(), &items, &[], "hi");
    assert!(prompt.contains("- User owns a bike\n"));
    assert!(!prompt.contains("similarity"));
}
