/// Engram system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Watermark value before any record has been folded in.
pub const UNSET_WATERMARK: i64 = 0;

/// Row id of the singleton state records.
pub const SINGLETON_ROW_ID: i64 = 1;

/// Metadata key stamped on ADD-ed items: id of the last record in the source window.
pub const META_SOURCE_WINDOW: &str = "source_window";

/// Prefix for deterministic long-term memory ids.
pub const MEMORY_ID_PREFIX: &str = "mem-";
