//! Plain SQL functions over a borrowed connection. Locking is the caller's job.

pub mod interaction_ops;
pub mod memory_item_ops;
pub mod state_ops;

use chrono::{DateTime, Utc};

use engram_core::errors::{EngramResult, StorageError};

pub(crate) fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

pub(crate) fn parse_ts(table: &str, raw: &str) -> EngramResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::CorruptRow {
                table: table.to_string(),
                details: format!("bad timestamp `{raw}`: {e}"),
            }
            .into()
        })
}

pub(crate) fn parse_opt_ts(table: &str, raw: Option<String>) -> EngramResult<Option<DateTime<Utc>>> {
    raw.as_deref().map(|s| parse_ts(table, s)).transpose()
}
