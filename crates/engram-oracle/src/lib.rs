//! # engram-oracle
//!
//! Blocking `/chat/completions` client. One system message, one user
//! message, the first choice's content back. Schema checking is left to
//! the caller.

pub mod chat;

pub use chat::ChatOracle;
