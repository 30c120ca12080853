//! Concurrent triggers never process the same window twice.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use engram_consolidation::{LongTermEngine, SummarizationEngine};
use engram_core::config::{ContextMemoryConfig, LongMemoryConfig, VectorConfig};
use engram_core::errors::EngramResult;
use engram_core::models::NewInteraction;
use engram_core::traits::{IInteractionLog, IReasoningOracle, IStateStore};
use engram_embeddings::TfIdfEmbedder;
use engram_storage::{SqliteVectorStore, StorageEngine};
use test_fixtures::ScriptedOracle;

#[test]
fn racing_summarize_triggers_fold_once() {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    for i in 0..4 {
        storage.append(&NewInteraction::user(format!("turn {i}"))).unwrap();
    }
    let oracle = Arc::new(ScriptedOracle::with_replies(["only summary"]));
    let engine = Arc::new(SummarizationEngine::new(
        storage.clone(),
        storage.clone(),
        oracle.clone(),
        &ContextMemoryConfig { summary_gap: 4 },
    ));

    let handles: Vec<_> = (0..8).filter_map(|_| engine.trigger_summarize()).collect();
    let spawned = handles.len() as u64;
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(spawned >= 1);
    assert_eq!(oracle.call_count(), 1);
    assert_eq!(engine.stats().runs, 1);
    assert_eq!(engine.stats().skips, spawned - 1);
    assert_eq!(storage.summary_state().unwrap().summary, "only summary");
}

#[test]
fn racing_consolidate_triggers_extract_once() {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    let config = VectorConfig::default();
    let vectors = Arc::new(SqliteVectorStore::new(
        storage.clone(),
        Arc::new(TfIdfEmbedder::new(64)),
        &config,
    ));
    let mut last = 0;
    for i in 0..3 {
        last = storage.append(&NewInteraction::user(format!("fact {i}"))).unwrap();
    }
    let oracle = Arc::new(ScriptedOracle::with_replies([r#"{"facts": []}"#]));
    let engine = Arc::new(LongTermEngine::new(
        storage.clone(),
        storage.clone(),
        vectors,
        oracle.clone(),
        &LongMemoryConfig { long_gap: 3 },
        &config,
    ));

    let handles: Vec<_> = (0..6).filter_map(|_| engine.trigger_consolidate()).collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(oracle.call_count(), 1);
    assert_eq!(engine.watermark().unwrap().last_extraction_id, last);
}

#[test]
fn appends_during_passes_are_picked_up_later() {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    let oracle = Arc::new(ScriptedOracle::new());
    for _ in 0..50 {
        oracle.push_reply("rolling");
    }
    let engine = Arc::new(SummarizationEngine::new(
        storage.clone(),
        storage.clone(),
        oracle.clone(),
        &ContextMemoryConfig { summary_gap: 2 },
    ));

    let mut handles = Vec::new();
    for i in 0..20 {
        storage.append(&NewInteraction::user(format!("turn {i}"))).unwrap();
        handles.extend(engine.trigger_summarize());
    }
    for handle in handles {
        handle.join().unwrap();
    }
    // Drain whatever the last triggers left behind.
    let _ = engine.summarize_now().unwrap();

    let state = storage.summary_state().unwrap();
    let pending = storage.count_since(state.last_summary_id).unwrap();
    assert!(pending < 2, "left {pending} turns unsummarized");

    let folded: usize = oracle
        .calls()
        .iter()
        .map(|c| c.user_content.matches("\nuser: turn ").count())
        .sum();
    assert_eq!(folded + pending, 20);
}

/// Blocks inside its first `chat` until released; later calls answer at once.
struct GatedOracle {
    entered: Mutex<Option<Sender<()>>>,
    release: Mutex<Option<Receiver<()>>>,
    calls: AtomicUsize,
}

impl IReasoningOracle for GatedOracle {
    fn chat(&self, _system: &str, _user: &str) -> EngramResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let release = self.release.lock().unwrap().take();
        if let Some(release) = release {
            if let Some(entered) = self.entered.lock().unwrap().take() {
                entered.send(()).unwrap();
            }
            release.recv().unwrap();
        }
        Ok("folded".to_string())
    }

    fn name(&self) -> &str {
        "gated"
    }
}

#[test]
fn triggers_while_a_pass_is_queued_are_coalesced() {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    storage.append(&NewInteraction::user("turn 0")).unwrap();
    let (entered_tx, entered_rx) = channel();
    let (release_tx, release_rx) = channel();
    let oracle = Arc::new(GatedOracle {
        entered: Mutex::new(Some(entered_tx)),
        release: Mutex::new(Some(release_rx)),
        calls: AtomicUsize::new(0),
    });
    let engine = Arc::new(SummarizationEngine::new(
        storage.clone(),
        storage.clone(),
        oracle.clone(),
        &ContextMemoryConfig { summary_gap: 1 },
    ));

    let running = engine.trigger_summarize().unwrap();
    entered_rx.recv().unwrap();

    // The running pass holds the lock; one more pass may queue behind it.
    storage.append(&NewInteraction::user("turn 1")).unwrap();
    let queued = engine.trigger_summarize().unwrap();
    let coalesced: Vec<_> = (0..10)
        .filter_map(|_| {
            storage.append(&NewInteraction::user("more")).unwrap();
            engine.trigger_summarize()
        })
        .collect();
    assert!(coalesced.is_empty());

    release_tx.send(()).unwrap();
    running.join().unwrap();
    queued.join().unwrap();

    assert_eq!(oracle.calls.load(Ordering::SeqCst), 2);
    let state = storage.summary_state().unwrap();
    assert_eq!(storage.count_since(state.last_summary_id).unwrap(), 0);
    assert_eq!(engine.stats().runs, 2);
}
