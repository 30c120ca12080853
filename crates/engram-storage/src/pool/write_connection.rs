//! Single write connection behind a `std::sync::Mutex`. Serialized writes.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use engram_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS;
use engram_core::errors::EngramResult;

use super::pragmas::apply_pragmas;
use crate::{lock_poisoned, to_storage_err};

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> EngramResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> EngramResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, DEFAULT_BUSY_TIMEOUT_MS)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> EngramResult<T>
    where
        F: FnOnce(&Connection) -> EngramResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| lock_poisoned("write connection"))?;
        f(&guard)
    }
}
