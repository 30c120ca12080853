//! Property tests: log ordering and watermark monotonicity in the state store.

use proptest::prelude::*;

use engram_core::models::{LongTermWatermark, NewInteraction, SummaryState};
use engram_core::traits::{IInteractionLog, IStateStore};
use engram_storage::StorageEngine;

proptest! {
    #[test]
    fn prop_tail_is_suffix_of_log(turns in 0usize..30, n in 0usize..40) {
        let engine = StorageEngine::open_in_memory().unwrap();
        for i in 0..turns {
            engine.append(&NewInteraction::user(format!("turn {i}"))).unwrap();
        }
        let tail = engine.tail(n).unwrap();
        prop_assert_eq!(tail.len(), n.min(turns));
        let expected: Vec<i64> = ((turns - tail.len() + 1) as i64..=turns as i64).collect();
        let ids: Vec<i64> = tail.iter().map(|r| r.id).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn prop_count_since_matches_since(turns in 0usize..30, watermark in 0i64..35) {
        let engine = StorageEngine::open_in_memory().unwrap();
        for i in 0..turns {
            engine.append(&NewInteraction::assistant(format!("reply {i}"))).unwrap();
        }
        let count = engine.count_since(watermark).unwrap();
        prop_assert_eq!(engine.since(watermark, usize::MAX).unwrap().len(), count);
    }

    #[test]
    fn prop_stored_watermarks_are_running_max(saves in prop::collection::vec(0i64..100, 1..20)) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let mut max_seen = 0;
        for id in saves {
            engine.save_summary_state(&SummaryState::advanced(format!("s{id}"), id)).unwrap();
            engine.save_long_term_watermark(&LongTermWatermark::at(id)).unwrap();
            max_seen = max_seen.max(id);
            prop_assert_eq!(engine.summary_state().unwrap().last_summary_id, max_seen);
            prop_assert_eq!(engine.long_term_watermark().unwrap().last_extraction_id, max_seen);
        }
    }
}
