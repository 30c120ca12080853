//! # engram-observability
//!
//! Structured tracing for the memory engines: subscriber setup driven by
//! `ENGRAM_LOG`, span macros per operation, and event helpers for pass
//! lifecycle and applied memory events.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, try_init_tracing_with_filter};
