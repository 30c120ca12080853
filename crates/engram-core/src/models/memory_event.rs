use std::fmt;

use serde::{Deserialize, Serialize};

use super::memory_item::Metadata;

/// Reconciliation verdict for one long-term memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "ADD")]
    Add,
    #[serde(rename = "UPDATE")]
    Update,
    #[serde(rename = "DELETE")]
    Delete,
    #[serde(rename = "NONE")]
    Noop,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Noop => "NONE",
        }
    }

    /// Case-insensitive parse of the oracle's event name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADD" => Some(Self::Add),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            "NONE" => Some(Self::Noop),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instruction from the merge step, applied to the vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEvent {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub meta: Metadata,
    pub event: EventKind,
}
