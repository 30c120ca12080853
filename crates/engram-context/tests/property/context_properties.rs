//! Property tests: block order survives any mix of empty and filled inputs.

use engram_context::assemble;
use engram_context::assembly::{HEADING_INPUT, HEADING_LONG_TERM, HEADING_RECENT, HEADING_SUMMARY};
use engram_core::models::{MemoryItem, Metadata, NewInteraction, Role, SummaryState};
use proptest::prelude::*;

fn role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Assistant), Just(Role::Tool)]
}

proptest! {
    #[test]
    fn prop_blocks_appear_in_fixed_order(
        summary in "[a-z ]{0,40}",
        memories in prop::collection::vec(("[a-z ]{1,20}", 0.0f32..1.0), 0..5),
        turns in prop::collection::vec((role(), "[a-z ]{0,30}"), 0..6),
        input in "[a-z ?]{0,30}",
    ) {
        let state = SummaryState::advanced(summary, 1);
        let items: Vec<MemoryItem> = memories
            .iter()
            .enumerate()
            .map(|(i, (text, sim))| {
                MemoryItem::new(format!("m{i}"), text.clone(), Metadata::new()).with_similarity(*sim)
            })
            .collect();
        let window: Vec<_> = turns
            .iter()
            .enumerate()
            .map(|(i, (role, text))| NewInteraction::new(*role, text.clone()).into_record(i as i64 + 1))
            .collect();

        let prompt = assemble(&state, &items, &window, &input);
        let positions: Vec<usize> = [HEADING_SUMMARY, HEADING_LONG_TERM, HEADING_RECENT, HEADING_INPUT]
            .iter()
            .map(|h| prompt.find(h).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        let expected_tail = format!("user: {input}\n");
        prop_assert!(prompt.ends_with(&expected_tail));
        prop_assert_eq!(&prompt, &assemble(&state, &items, &window, &input));
    }
}
