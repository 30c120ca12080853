//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::Path;

use engram_core::errors::EngramResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// The single write connection plus, for file-backed databases, a read pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    /// `None` in in-memory mode: a second in-memory connection would be a
    /// separate database, so reads go through the writer.
    pub readers: Option<ReadPool>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    pub fn open(path: &Path, read_pool_size: usize, busy_timeout_ms: u32) -> EngramResult<Self> {
        let writer = WriteConnection::open(path, busy_timeout_ms)?;
        let readers = ReadPool::open(path, read_pool_size, busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers: Some(readers),
        })
    }

    /// Open an in-memory database with no read pool (for testing).
    pub fn open_in_memory() -> EngramResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
            readers: None,
        })
    }
}
