/// Storage-layer errors for the relational and vector stores.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("lock poisoned: {resource}")]
    LockPoisoned { resource: String },

    #[error("corrupt row in {table}: {details}")]
    CorruptRow { table: String, details: String },
}
