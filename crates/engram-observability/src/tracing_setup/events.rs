//! Structured log events for pass lifecycle and memory changes.
//!
//! Each function emits a `tracing` event with structured fields.

/// A pass was triggered but too few turns are pending.
pub fn pass_skipped(pass: &str, pending: usize, gap: usize) {
    tracing::debug!(
        event = "pass_skipped",
        pass = %pass,
        pending = pending,
        gap = gap,
        "pass skipped, gap not reached"
    );
}

/// A pass finished and advanced its watermark.
pub fn pass_completed(pass: &str, watermark: i64, processed: usize) {
    tracing::info!(
        event = "pass_completed",
        pass = %pass,
        watermark = watermark,
        processed = processed,
        "pass completed"
    );
}

/// A background pass failed; the watermark was left where it was.
pub fn pass_failed(pass: &str, watermark: i64, error: &dyn std::fmt::Display) {
    tracing::warn!(
        event = "pass_failed",
        pass = %pass,
        watermark = watermark,
        error = %error,
        "pass failed, watermark unchanged"
    );
}

/// One reconciliation event was applied to the vector store.
pub fn memory_event_applied(memory_id: &str, kind: &str) {
    tracing::debug!(
        event = "memory_event_applied",
        memory_id = %memory_id,
        kind = %kind,
        "memory event applied"
    );
}
