//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use engram_core::config::defaults::{DEFAULT_LOG_LEVEL, LOG_ENV_VAR};
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber with structured JSON output.
///
/// Respects the `ENGRAM_LOG` environment variable for filtering and
/// defaults to `info`. Calling it twice is a no-op.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init();
}

/// Initialize tracing with an explicit filter string (for tests or embedding).
///
/// Returns `false` when a global subscriber was already installed.
pub fn try_init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
