//! Singleton-row reads and monotonic upserts for the derived state.

use rusqlite::{params, Connection, OptionalExtension};

use engram_core::constants::SINGLETON_ROW_ID;
use engram_core::errors::EngramResult;
use engram_core::models::{LongTermWatermark, SummaryState};

use super::{format_ts, parse_opt_ts};
use crate::to_storage_err;

/// Read the summary row, or the default state if it was never written.
pub fn get_summary_state(conn: &Connection) -> EngramResult<SummaryState> {
    let row = conn
        .query_row(
            "SELECT summary, last_summary_id, updated_at FROM summary_state WHERE id = ?1",
            params![SINGLETON_ROW_ID],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((summary, last_summary_id, updated_at)) => Ok(SummaryState {
            summary,
            last_summary_id,
            updated_at: parse_opt_ts("summary_state", updated_at)?,
        }),
        None => Ok(SummaryState::default()),
    }
}

/// Upsert the summary row. A save that would move the watermark backwards
/// is ignored; returns whether the row changed.
pub fn save_summary_state(conn: &Connection, state: &SummaryState) -> EngramResult<bool> {
    let changed = conn
        .execute(
            "INSERT INTO summary_state (id, summary, last_summary_id, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                summary = excluded.summary,
                last_summary_id = excluded.last_summary_id,
                updated_at = excluded.updated_at
             WHERE excluded.last_summary_id >= summary_state.last_summary_id",
            params![
                SINGLETON_ROW_ID,
                state.summary,
                state.last_summary_id,
                state.updated_at.as_ref().map(format_ts)
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}

/// Read the long-term watermark, or the default if it was never written.
pub fn get_long_term_watermark(conn: &Connection) -> EngramResult<LongTermWatermark> {
    let row = conn
        .query_row(
            "SELECT last_extraction_id, updated_at FROM long_term_watermark WHERE id = ?1",
            params![SINGLETON_ROW_ID],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((last_extraction_id, updated_at)) => Ok(LongTermWatermark {
            last_extraction_id,
            updated_at: parse_opt_ts("long_term_watermark", updated_at)?,
        }),
        None => Ok(LongTermWatermark::default()),
    }
}

/// Upsert the long-term watermark, never moving it backwards.
pub fn save_long_term_watermark(
    conn: &Connection,
    watermark: &LongTermWatermark,
) -> EngramResult<bool> {
    let changed = conn
        .execute(
            "INSERT INTO long_term_watermark (id, last_extraction_id, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                last_extraction_id = excluded.last_extraction_id,
                updated_at = excluded.updated_at
             WHERE excluded.last_extraction_id >= long_term_watermark.last_extraction_id",
            params![
                SINGLETON_ROW_ID,
                watermark.last_extraction_id,
                watermark.updated_at.as_ref().map(format_ts)
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}
