//! Opening the orchestrator on the default SQLite stack.

use std::sync::Arc;

use engram_consolidation::prompts::{FACT_EXTRACTION_INSTRUCTION, FOLD_SUMMARY_INSTRUCTION};
use engram_core::config::EngramConfig;
use engram_session::MemoryOrchestrator;
use test_fixtures::RoutingOracle;

fn file_config(dir: &tempfile::TempDir) -> EngramConfig {
    let mut config = EngramConfig::default();
    config.storage.db_path = dir.path().join("memory.db").display().to_string();
    config.context_memory.summary_gap = 2;
    config.long_memory.long_gap = 2;
    config
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir);
    let oracle = Arc::new(RoutingOracle::new());
    oracle.route(FOLD_SUMMARY_INSTRUCTION, "User asked about ferries.");
    oracle.route(
        FACT_EXTRACTION_INSTRUCTION,
        r#"{"facts": []}"#,
    );

    {
        let memory = MemoryOrchestrator::open(&config, oracle.clone()).unwrap();
        memory.process_input("When does the ferry leave?").unwrap();
        memory.process_output("Every hour on the hour.").unwrap();
        memory.flush().unwrap();
    }

    let memory = MemoryOrchestrator::open(&config, oracle).unwrap();
    assert_eq!(memory.summary().unwrap().summary, "User asked about ferries.");
    let window = memory.short_term_window().unwrap();
    assert_eq!(window.len(), 2);
    let prompt = memory.process_input("And on Sundays?").unwrap();
    assert!(prompt.contains("User asked about ferries."));
    assert!(prompt.contains("assistant: Every hour on the hour."));
}

#[test]
fn from_config_file_builds_the_default_stack() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("engram.db");
    let config_path = dir.path().join("engram.toml");
    std::fs::write(
        &config_path,
        format!(
            "[storage]\ndb_path = {:?}\n\n[short_memory]\nshort_window = 2\n",
            db_path.display().to_string()
        ),
    )
    .unwrap();

    let memory = MemoryOrchestrator::from_config_file(&config_path).unwrap();
    let prompt = memory.process_input("hi").unwrap();
    assert!(prompt.contains("(no recent conversation)"));
    assert!(db_path.exists());
}
