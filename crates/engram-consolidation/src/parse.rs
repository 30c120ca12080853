//! Strict parsing of oracle replies into facts and memory events.
//!
//! Accepted noise: surrounding whitespace and one enclosing Markdown code
//! fence. Anything else that does not match the schema is an
//! [`OracleFormatError`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use engram_core::errors::OracleFormatError;
use engram_core::models::{EventKind, Fact, MemoryEvent, Metadata};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

pub const FACTS_SCHEMA: &str = "facts";
pub const MEMORY_SCHEMA: &str = "memory";

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?```$").expect("static regex")
});

/// Trim the reply and unwrap a single enclosing code fence.
pub fn strip_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    match CODE_FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim(),
        None => trimmed,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFact {
    Structured(Fact),
    Plain(String),
}

#[derive(Deserialize)]
struct FactsReply {
    facts: Vec<RawFact>,
}

/// Parse `{"facts": [...]}`. Facts may be objects or plain strings; facts
/// with blank content are dropped.
pub fn parse_facts(reply: &str) -> Result<Vec<Fact>, OracleFormatError> {
    let parsed: FactsReply =
        serde_json::from_str(strip_fence(reply)).map_err(|e| invalid(FACTS_SCHEMA, e))?;
    Ok(parsed
        .facts
        .into_iter()
        .map(|raw| match raw {
            RawFact::Structured(fact) => fact,
            RawFact::Plain(content) => Fact::plain(content),
        })
        .filter(|fact| !fact.content.trim().is_empty())
        .collect())
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    meta: Option<BTreeMap<String, Value>>,
    event: String,
}

#[derive(Deserialize)]
struct MemoryReply {
    memory: Vec<RawEvent>,
}

/// Parse `{"memory": [...]}` into validated events.
///
/// UPDATE and DELETE need an id; ADD and UPDATE need text. Event names are
/// case-insensitive; an unknown name fails the whole reply.
pub fn parse_memory_events(reply: &str) -> Result<Vec<MemoryEvent>, OracleFormatError> {
    let parsed: MemoryReply =
        serde_json::from_str(strip_fence(reply)).map_err(|e| invalid(MEMORY_SCHEMA, e))?;

    parsed
        .memory
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            let event = EventKind::parse(&raw.event).ok_or_else(|| OracleFormatError::UnknownEvent {
                event: raw.event.clone(),
            })?;
            let id = raw.id.as_ref().map(scalar_to_string).unwrap_or_default();
            let text = raw.text.unwrap_or_default();

            let needs_id = matches!(event, EventKind::Update | EventKind::Delete);
            if needs_id && id.trim().is_empty() {
                return Err(missing(idx, event, "id"));
            }
            let needs_text = matches!(event, EventKind::Add | EventKind::Update);
            if needs_text && text.trim().is_empty() {
                return Err(missing(idx, event, "text"));
            }

            let meta: Metadata = raw
                .meta
                .unwrap_or_default()
                .iter()
                .map(|(k, v)| (k.clone(), scalar_to_string(v)))
                .collect();

            Ok(MemoryEvent {
                id: id.trim().to_string(),
                text: text.trim().to_string(),
                meta,
                event,
            })
        })
        .collect()
}

/// Strings as-is, everything else as its JSON rendering.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn invalid(schema: &str, e: serde_json::Error) -> OracleFormatError {
    OracleFormatError::InvalidJson {
        schema: schema.to_string(),
        reason: e.to_string(),
    }
}

fn missing(idx: usize, event: EventKind, field: &str) -> OracleFormatError {
    OracleFormatError::InvalidJson {
        schema: MEMORY_SCHEMA.to_string(),
        reason: format!("entry {idx}: {event} without {field}"),
    }
}
