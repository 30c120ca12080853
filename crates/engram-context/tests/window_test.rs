//! ShortTermWindow over the SQLite log.

use std::sync::Arc;

use engram_context::ShortTermWindow;
use engram_core::models::NewInteraction;
use engram_core::traits::IInteractionLog;
use engram_storage::StorageEngine;

fn log_with(n: usize) -> Arc<StorageEngine> {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    for i in 0..n {
        storage.append(&NewInteraction::user(format!("turn {i}"))).unwrap();
    }
    storage
}

#[test]
fn window_is_the_newest_turns_oldest_first() {
    let window = ShortTermWindow::new(log_with(10), 4);
    let records = window.current().unwrap();
    let contents: Vec<&str> = records.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, ["turn 6", "turn 7", "turn 8", "turn 9"]);
}

#[test]
fn short_log_returns_everything() {
    let window = ShortTermWindow::new(log_with(2), 6);
    assert_eq!(window.get_window(6).unwrap().len(), 2);
}

#[test]
fn empty_log_and_zero_size_return_nothing() {
    let window = ShortTermWindow::new(log_with(0), 6);
    assert!(window.current().unwrap().is_empty());

    let window = ShortTermWindow::new(log_with(3), 6);
    assert!(window.get_window(0).unwrap().is_empty());
}

#[test]
fn reading_does_not_append() {
    let storage = log_with(3);
    let window = ShortTermWindow::new(storage.clone(), 2);
    window.current().unwrap();
    window.current().unwrap();
    assert_eq!(storage.count_since(0).unwrap(), 3);
}
