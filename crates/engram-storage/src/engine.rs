//! StorageEngine: owns the ConnectionPool, runs migrations at startup, and
//! implements the interaction log and derived-state store contracts.

use std::path::Path;

use engram_core::config::StorageConfig;
use engram_core::config::defaults::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_READ_POOL_SIZE};
use engram_core::errors::EngramResult;
use engram_core::models::{InteractionRecord, LongTermWatermark, NewInteraction, SummaryState};
use engram_core::traits::{IInteractionLog, IStateStore};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{interaction_ops, state_ops};

/// SQLite-backed interaction log and state store.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk, with default pool settings.
    pub fn open(path: &Path) -> EngramResult<Self> {
        Self::open_with(path, DEFAULT_READ_POOL_SIZE, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Open the database named by `config.db_path`.
    pub fn open_with_config(config: &StorageConfig) -> EngramResult<Self> {
        Self::open_with(
            Path::new(&config.db_path),
            config.read_pool_size,
            config.busy_timeout_ms,
        )
    }

    fn open_with(path: &Path, read_pool_size: usize, busy_timeout_ms: u32) -> EngramResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open(path, read_pool_size, busy_timeout_ms)?,
        };
        engine.initialize()?;
        tracing::debug!(path = %path.display(), "storage engine opened");
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing). All reads go
    /// through the writer.
    pub fn open_in_memory() -> EngramResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run pending migrations on the writer.
    fn initialize(&self) -> EngramResult<()> {
        self.pool.writer.with_conn(migrations::run_migrations)
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Total number of interaction records.
    pub fn total_count(&self) -> EngramResult<usize> {
        self.with_reader(interaction_ops::total_count)
    }

    /// Execute a closure on the write connection.
    pub(crate) fn with_writer<F, T>(&self, f: F) -> EngramResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> EngramResult<T>,
    {
        self.pool.writer.with_conn(f)
    }

    /// Execute a read-only closure on the best available connection.
    /// File-backed: the read pool. In-memory: the writer.
    pub(crate) fn with_reader<F, T>(&self, f: F) -> EngramResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> EngramResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }
}

impl IInteractionLog for StorageEngine {
    fn append(&self, record: &NewInteraction) -> EngramResult<i64> {
        self.with_writer(|conn| interaction_ops::append(conn, record))
    }

    fn tail(&self, n: usize) -> EngramResult<Vec<InteractionRecord>> {
        self.with_reader(|conn| interaction_ops::tail(conn, n))
    }

    fn since(&self, watermark: i64, limit: usize) -> EngramResult<Vec<InteractionRecord>> {
        self.with_reader(|conn| interaction_ops::since(conn, watermark, limit))
    }

    fn count_since(&self, watermark: i64) -> EngramResult<usize> {
        self.with_reader(|conn| interaction_ops::count_since(conn, watermark))
    }
}

impl IStateStore for StorageEngine {
    fn summary_state(&self) -> EngramResult<SummaryState> {
        self.with_reader(state_ops::get_summary_state)
    }

    fn save_summary_state(&self, state: &SummaryState) -> EngramResult<()> {
        let changed = self.with_writer(|conn| state_ops::save_summary_state(conn, state))?;
        if !changed {
            tracing::warn!(
                last_summary_id = state.last_summary_id,
                "summary state not saved, stored watermark is newer"
            );
        }
        Ok(())
    }

    fn long_term_watermark(&self) -> EngramResult<LongTermWatermark> {
        self.with_reader(state_ops::get_long_term_watermark)
    }

    fn save_long_term_watermark(&self, watermark: &LongTermWatermark) -> EngramResult<()> {
        let changed =
            self.with_writer(|conn| state_ops::save_long_term_watermark(conn, watermark))?;
        if !changed {
            tracing::warn!(
                last_extraction_id = watermark.last_extraction_id,
                "long-term watermark not saved, stored watermark is newer"
            );
        }
        Ok(())
    }
}
