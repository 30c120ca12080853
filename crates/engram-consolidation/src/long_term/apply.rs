//! Applying reconciliation events to the vector store.
//!
//! Not transactional: a failure part-way leaves earlier events applied. ADD
//! ids are derived from the watermark the pass started at and the text. The
//! watermark only moves when a pass succeeds, so a retry overwrites the
//! items a failed attempt already wrote even if its window grew meanwhile.

use std::collections::HashSet;

use engram_core::constants::{MEMORY_ID_PREFIX, META_SOURCE_WINDOW};
use engram_core::errors::EngramResult;
use engram_core::models::{EventKind, MemoryEvent};
use engram_core::traits::IVectorStore;
use engram_observability::tracing_setup::events;

use crate::outcome::ApplyReport;

/// Deterministic id for text ADD-ed by a pass that started at `watermark`.
pub fn memory_id_for(watermark: i64, text: &str) -> String {
    let normalized = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let mut hasher = blake3::Hasher::new();
    hasher.update(watermark.to_string().as_bytes());
    hasher.update(b"\n");
    hasher.update(normalized.as_bytes());
    let hex = hasher.finalize().to_hex();
    format!("{MEMORY_ID_PREFIX}{}", &hex[..32])
}

/// Apply `memory_events` in order. The first store error aborts the rest.
///
/// A second ADD of the same normalized text within one reply would land on
/// the same row; it is counted as unchanged and not written.
pub fn apply_events(
    store: &dyn IVectorStore,
    memory_events: &[MemoryEvent],
    watermark: i64,
    window_end: i64,
) -> EngramResult<ApplyReport> {
    let mut report = ApplyReport {
        watermark: window_end,
        ..ApplyReport::default()
    };
    let mut added: HashSet<String> = HashSet::new();

    for event in memory_events {
        match event.event {
            EventKind::Add => {
                let id = memory_id_for(watermark, &event.text);
                if !added.insert(id.clone()) {
                    report.unchanged += 1;
                    continue;
                }
                let mut meta = event.meta.clone();
                meta.insert(META_SOURCE_WINDOW.to_string(), window_end.to_string());
                store.add(&id, &event.text, &meta)?;
                events::memory_event_applied(&id, EventKind::Add.as_str());
                report.added += 1;
                report.added_ids.push(id);
            }
            EventKind::Update => {
                store.add(&event.id, &event.text, &event.meta)?;
                events::memory_event_applied(&event.id, EventKind::Update.as_str());
                report.updated += 1;
            }
            EventKind::Delete => {
                store.delete(std::slice::from_ref(&event.id))?;
                events::memory_event_applied(&event.id, EventKind::Delete.as_str());
                report.deleted += 1;
            }
            EventKind::Noop => report.unchanged += 1,
        }
    }
    Ok(report)
}
