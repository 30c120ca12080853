//! Test doubles and fixture loading shared by every crate's tests.
//!
//! - [`ScriptedOracle`]: replies from a queue, records every call.
//! - [`RoutingOracle`]: replies chosen by system instruction, for
//!   concurrent engines.
//! - [`FaultyVectorStore`]: wraps a real store and fails on demand.
//! - [`load_fixture`]: typed JSON fixtures from `fixtures/`.

pub mod faulty_store;
pub mod routing_oracle;
pub mod scripted_oracle;

pub use faulty_store::{FaultyVectorStore, VectorOp};
pub use routing_oracle::RoutingOracle;
pub use scripted_oracle::{OracleCall, ScriptedOracle};

use std::path::PathBuf;

use engram_core::models::{NewInteraction, Role};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the bundled fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// A recorded conversation with the oracle replies a full run expects.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationFixture {
    pub name: String,
    pub turns: Vec<FixtureTurn>,
    /// Replies in the order the engines will ask for them.
    #[serde(default)]
    pub oracle_replies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTurn {
    pub role: Role,
    pub content: String,
}

impl FixtureTurn {
    pub fn to_new(&self) -> NewInteraction {
        NewInteraction::new(self.role, self.content.clone())
    }
}

/// Load `fixtures/conversations/<name>.json`.
pub fn load_conversation(name: &str) -> ConversationFixture {
    load_fixture(&format!("conversations/{name}.json"))
}
