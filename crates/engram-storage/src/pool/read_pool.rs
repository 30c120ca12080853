//! Read-only connections for the foreground path.
//!
//! Under WAL these never wait on the writer, so prompt assembly keeps
//! reading while a consolidation pass is writing.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, TryLockError};

use rusqlite::{Connection, OpenFlags};

use engram_core::errors::EngramResult;

use super::pragmas::apply_read_pragmas;
use crate::{lock_poisoned, to_storage_err};

const MAX_READERS: usize = 8;

pub struct ReadPool {
    readers: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open `size` read-only connections (clamped to 1..=8).
    pub fn open(path: &Path, size: usize, busy_timeout_ms: u32) -> EngramResult<Self> {
        let readers = (0..size.clamp(1, MAX_READERS))
            .map(|_| -> EngramResult<Mutex<Connection>> {
                let conn = Connection::open_with_flags(
                    path,
                    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
                apply_read_pragmas(&conn, busy_timeout_ms)?;
                Ok(Mutex::new(conn))
            })
            .collect::<EngramResult<Vec<_>>>()?;
        Ok(Self {
            readers,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on an idle reader if one is free, otherwise wait on the
    /// next one in rotation.
    pub fn with_conn<F, T>(&self, f: F) -> EngramResult<T>
    where
        F: FnOnce(&Connection) -> EngramResult<T>,
    {
        let start = self.cursor.fetch_add(1, Ordering::Relaxed);
        let n = self.readers.len();
        for offset in 0..n {
            match self.readers[(start + offset) % n].try_lock() {
                Ok(conn) => return f(&conn),
                Err(TryLockError::WouldBlock) => continue,
                Err(TryLockError::Poisoned(_)) => return Err(lock_poisoned("read pool")),
            }
        }
        let conn = self.readers[start % n]
            .lock()
            .map_err(|_| lock_poisoned("read pool"))?;
        f(&conn)
    }
}
