//! Property tests: watermarks never decrease and never pass the log's end.

use std::sync::Arc;

use engram_consolidation::{LongTermEngine, SummarizationEngine};
use engram_core::config::{ContextMemoryConfig, LongMemoryConfig, VectorConfig};
use engram_core::models::NewInteraction;
use engram_core::traits::{IInteractionLog, IStateStore};
use engram_embeddings::TfIdfEmbedder;
use engram_storage::{SqliteVectorStore, StorageEngine};
use proptest::prelude::*;
use test_fixtures::ScriptedOracle;

/// One step of a random session: append some turns, then maybe fail the
/// oracle for the next pass.
#[derive(Debug, Clone)]
struct Step {
    appends: usize,
    oracle_fails: bool,
}

fn step() -> impl Strategy<Value = Step> {
    (0usize..5, prop::bool::weighted(0.25)).prop_map(|(appends, oracle_fails)| Step {
        appends,
        oracle_fails,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn summary_watermark_is_monotonic(gap in 1usize..5, steps in prop::collection::vec(step(), 1..12)) {
        let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
        let oracle = Arc::new(ScriptedOracle::new());
        let engine = SummarizationEngine::new(
            storage.clone(),
            storage.clone(),
            oracle.clone(),
            &ContextMemoryConfig { summary_gap: gap },
        );

        let mut last_id = 0;
        let mut previous = 0;
        for (i, s) in steps.iter().enumerate() {
            for _ in 0..s.appends {
                last_id = storage.append(&NewInteraction::user(format!("turn {i}"))).unwrap();
            }
            if s.oracle_fails {
                oracle.push_failure(500);
            } else {
                oracle.push_reply(format!("summary after step {i}"));
            }
            let result = engine.summarize_now();

            let current = storage.summary_state().unwrap().last_summary_id;
            prop_assert!(current >= previous);
            prop_assert!(current <= last_id);
            if result.is_err() {
                prop_assert_eq!(current, previous);
            }
            // Either the pass caught up or fewer than `gap` turns remain.
            if result.is_ok() {
                prop_assert!(storage.count_since(current).unwrap() < gap.max(1) || current == last_id);
            }
            previous = current;
        }
    }

    #[test]
    fn long_term_watermark_is_monotonic(gap in 1usize..5, steps in prop::collection::vec(step(), 1..12)) {
        let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
        let config = VectorConfig::default();
        let vectors = Arc::new(SqliteVectorStore::new(
            storage.clone(),
            Arc::new(TfIdfEmbedder::new(32)),
            &config,
        ));
        let oracle = Arc::new(ScriptedOracle::new());
        let engine = LongTermEngine::new(
            storage.clone(),
            storage.clone(),
            vectors,
            oracle.clone(),
            &LongMemoryConfig { long_gap: gap },
            &config,
        );

        let mut last_id = 0;
        let mut previous = 0;
        for (i, s) in steps.iter().enumerate() {
            for _ in 0..s.appends {
                last_id = storage.append(&NewInteraction::user(format!("turn {i}"))).unwrap();
            }
            if s.oracle_fails {
                oracle.push_failure(502);
            } else {
                oracle.push_reply(r#"{"facts": []}"#);
            }
            let result = engine.consolidate_now();

            let current = storage.long_term_watermark().unwrap().last_extraction_id;
            prop_assert!(current >= previous);
            prop_assert!(current <= last_id);
            if result.is_err() {
                prop_assert_eq!(current, previous);
            }
            previous = current;
        }
    }
}
