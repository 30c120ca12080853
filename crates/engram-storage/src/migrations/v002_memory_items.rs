//! v002: long-term memory items with their embeddings.

use rusqlite::Connection;

use engram_core::errors::EngramResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> EngramResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS memory_items (
            id          TEXT NOT NULL,
            collection  TEXT NOT NULL,
            text        TEXT NOT NULL,
            metadata    TEXT NOT NULL DEFAULT '{}',
            embedding   BLOB NOT NULL,
            dimensions  INTEGER NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (collection, id)
        );

        CREATE INDEX IF NOT EXISTS idx_memory_items_collection ON memory_items(collection);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
