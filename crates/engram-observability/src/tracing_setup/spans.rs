//! Span definitions per operation: summarize, consolidate, assemble, oracle.

/// Create a summarization pass span.
#[macro_export]
macro_rules! summarize_span {
    ($watermark:expr) => {
        tracing::info_span!("engram.summarize", watermark = $watermark)
    };
}

/// Create a long-term consolidation pass span.
#[macro_export]
macro_rules! consolidate_span {
    ($watermark:expr) => {
        tracing::info_span!("engram.consolidate", watermark = $watermark)
    };
}

/// Create a context assembly span.
#[macro_export]
macro_rules! assemble_span {
    ($window_len:expr, $long_term_len:expr) => {
        tracing::debug_span!(
            "engram.assemble",
            window_len = $window_len,
            long_term_len = $long_term_len
        )
    };
}

/// Create a span around one oracle round trip.
#[macro_export]
macro_rules! oracle_span {
    ($oracle:expr, $purpose:expr) => {
        tracing::info_span!("engram.oracle", oracle = %$oracle, purpose = %$purpose)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SUMMARIZE: &str = "engram.summarize";
    pub const CONSOLIDATE: &str = "engram.consolidate";
    pub const ASSEMBLE: &str = "engram.assemble";
    pub const ORACLE: &str = "engram.oracle";
}
