//! v001: interaction log and the two derived-state singletons.

use rusqlite::Connection;

use engram_core::errors::EngramResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> EngramResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS interactions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            role        TEXT NOT NULL CHECK (role IN ('user', 'assistant', 'tool')),
            content     TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS summary_state (
            id               INTEGER PRIMARY KEY CHECK (id = 1),
            summary          TEXT NOT NULL DEFAULT '',
            last_summary_id  INTEGER NOT NULL DEFAULT 0,
            updated_at       TEXT
        );

        CREATE TABLE IF NOT EXISTS long_term_watermark (
            id                  INTEGER PRIMARY KEY CHECK (id = 1),
            last_extraction_id  INTEGER NOT NULL DEFAULT 0,
            updated_at          TEXT
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
