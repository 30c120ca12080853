//! MemoryOrchestrator: foreground reads and writes, background passes.

use std::path::Path;
use std::sync::Arc;

use engram_consolidation::{LongTermEngine, PassStatsSnapshot, SummarizationEngine};
use engram_context::{assemble, ShortTermWindow};
use engram_core::config::EngramConfig;
use engram_core::errors::EngramResult;
use engram_core::models::{InteractionRecord, MemoryItem, NewInteraction, SummaryState};
use engram_core::traits::{IInteractionLog, IReasoningOracle, IStateStore, IVectorStore};
use engram_embeddings::create_provider;
use engram_oracle::ChatOracle;
use engram_storage::{SqliteVectorStore, StorageEngine};
use tracing::{debug, info};

use crate::background::BackgroundTasks;

/// Top-level memory façade.
///
/// Foreground calls never wait on a background pass; only [`flush`]
/// does. Dropping the orchestrator does not wait either: passes still
/// running finish on their own threads.
///
/// [`flush`]: MemoryOrchestrator::flush
pub struct MemoryOrchestrator {
    log: Arc<dyn IInteractionLog>,
    window: ShortTermWindow,
    summarizer: Arc<SummarizationEngine>,
    long_term: Arc<LongTermEngine>,
    tasks: BackgroundTasks,
}

impl MemoryOrchestrator {
    /// Wire the orchestrator from arbitrary collaborators.
    pub fn new(
        log: Arc<dyn IInteractionLog>,
        state: Arc<dyn IStateStore>,
        vectors: Arc<dyn IVectorStore>,
        oracle: Arc<dyn IReasoningOracle>,
        config: &EngramConfig,
    ) -> Self {
        let summarizer = Arc::new(SummarizationEngine::new(
            log.clone(),
            state.clone(),
            oracle.clone(),
            &config.context_memory,
        ));
        let long_term = Arc::new(LongTermEngine::new(
            log.clone(),
            state,
            vectors,
            oracle,
            &config.long_memory,
            &config.vector,
        ));
        Self {
            window: ShortTermWindow::new(log.clone(), config.short_memory.short_window),
            log,
            summarizer,
            long_term,
            tasks: BackgroundTasks::new(),
        }
    }

    /// SQLite log and state, SQLite vector store with the configured
    /// embedder, and the given oracle.
    pub fn open(config: &EngramConfig, oracle: Arc<dyn IReasoningOracle>) -> EngramResult<Self> {
        let storage = Arc::new(StorageEngine::open_with_config(&config.storage)?);
        let embedder = create_provider(&config.embedding)?;
        let vectors = Arc::new(SqliteVectorStore::new(
            storage.clone(),
            embedder,
            &config.vector,
        ));
        info!(
            db_path = %config.storage.db_path,
            collection = %vectors.collection(),
            oracle = %oracle.name(),
            "memory orchestrator opened"
        );
        Ok(Self::new(storage.clone(), storage, vectors, oracle, config))
    }

    /// [`open`](Self::open) with the chat-completions oracle from `config.oracle`.
    pub fn from_config(config: &EngramConfig) -> EngramResult<Self> {
        let oracle = Arc::new(ChatOracle::from_config(&config.oracle)?);
        Self::open(config, oracle)
    }

    /// Load configuration from `path` plus `ENGRAM_*` overrides, then
    /// [`from_config`](Self::from_config).
    pub fn from_config_file(path: &Path) -> EngramResult<Self> {
        let config = EngramConfig::load(Some(path))?;
        Self::from_config(&config)
    }

    /// Build the prompt for `text`, then record it as a user turn.
    ///
    /// Memory is read before the append so the active turn shows up only
    /// in the input block.
    pub fn process_input(&self, text: &str) -> EngramResult<String> {
        let window = self.window.current()?;
        let summary = self.summarizer.get_summary()?;
        let long_term = self.long_term.get_long_term_memory(text)?;
        let prompt = assemble(&summary, &long_term, &window, text);

        let id = self.log.append(&NewInteraction::user(text))?;
        debug!(
            id,
            window = window.len(),
            long_term = long_term.len(),
            "user turn recorded"
        );
        Ok(prompt)
    }

    /// Record the model's reply and fire both background passes.
    pub fn process_output(&self, text: &str) -> EngramResult<i64> {
        let id = self.log.append(&NewInteraction::assistant(text))?;
        // A `None` means that engine already has a pass queued.
        let handles = [
            self.summarizer.trigger_summarize(),
            self.long_term.trigger_consolidate(),
        ];
        for handle in handles.into_iter().flatten() {
            self.tasks.track(handle);
        }
        debug!(id, "assistant turn recorded; passes triggered");
        Ok(id)
    }

    /// Record a tool result. Does not trigger any pass.
    pub fn record_tool_output(&self, text: &str) -> EngramResult<i64> {
        self.log.append(&NewInteraction::tool(text))
    }

    /// Wait for every background pass fired so far.
    ///
    /// Pass errors are logged and retried on the next trigger, not returned
    /// here. Only passes that panicked surface as an error.
    pub fn flush(&self) -> EngramResult<()> {
        self.tasks.join_all()
    }

    pub fn summary(&self) -> EngramResult<SummaryState> {
        self.summarizer.get_summary()
    }

    pub fn long_term_memory(&self, query: &str) -> EngramResult<Vec<MemoryItem>> {
        self.long_term.get_long_term_memory(query)
    }

    pub fn short_term_window(&self) -> EngramResult<Vec<InteractionRecord>> {
        self.window.current()
    }

    pub fn summary_stats(&self) -> PassStatsSnapshot {
        self.summarizer.stats()
    }

    pub fn long_term_stats(&self) -> PassStatsSnapshot {
        self.long_term.stats()
    }

    /// Background passes that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.tasks.in_flight()
    }
}

impl Drop for MemoryOrchestrator {
    fn drop(&mut self) {
        let pending = self.tasks.in_flight();
        if pending > 0 {
            debug!(pending, "dropping orchestrator with passes still running");
        }
    }
}
