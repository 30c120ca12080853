// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "engram.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Vector store ---
pub const DEFAULT_COLLECTION: &str = "long_term";
pub const DEFAULT_MAX_TOP_K: usize = 5;
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.0;
pub const DEFAULT_CANDIDATE_TOP_K: usize = 5;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Oracle ---
pub const DEFAULT_ORACLE_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 60;

// --- Memory tiers ---
pub const DEFAULT_SUMMARY_GAP: usize = 3;
pub const DEFAULT_LONG_GAP: usize = 3;
pub const DEFAULT_SHORT_WINDOW: usize = 6;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_ENV_VAR: &str = "ENGRAM_LOG";
