//! Versioned schema migrations tracked in the `schema_version` table.

pub mod v001_interaction_log;
pub mod v002_memory_items;

use rusqlite::Connection;

use engram_core::errors::{EngramResult, StorageError};

type Migration = fn(&Connection) -> EngramResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_interaction_log::migrate),
    (2, v002_memory_items::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the recorded schema version.
pub fn run_migrations(conn: &Connection) -> EngramResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| failed(0, e))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| failed(*version, e))?;
        let applied = migrate(conn).and_then(|()| {
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [version],
            )
            .map(|_| ())
            .map_err(|e| failed(*version, e))
        });
        match applied {
            Ok(()) => {
                conn.execute_batch("COMMIT").map_err(|e| failed(*version, e))?;
                tracing::info!(version = version, "applied migration");
            }
            Err(err) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(err);
            }
        }
    }
    Ok(())
}

/// Highest applied schema version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> EngramResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| failed(0, e))
}

fn failed(version: u32, e: rusqlite::Error) -> engram_core::EngramError {
    StorageError::MigrationFailed {
        version,
        reason: e.to_string(),
    }
    .into()
}
