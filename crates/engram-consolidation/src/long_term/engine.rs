//! LongTermEngine: one watermark, one lock, two oracle round trips per pass.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread::JoinHandle;

use engram_core::config::{LongMemoryConfig, VectorConfig};
use engram_core::constants::UNSET_WATERMARK;
use engram_core::errors::EngramResult;
use engram_core::models::{Fact, InteractionRecord, LongTermWatermark, MemoryItem};
use engram_core::traits::{IInteractionLog, IReasoningOracle, IStateStore, IVectorStore};
use engram_observability::tracing_setup::events;
use engram_observability::{consolidate_span, oracle_span};
use rayon::prelude::*;
use tracing::debug;

use super::apply::apply_events;
use crate::outcome::{ApplyReport, ConsolidationOutcome};
use crate::parse;
use crate::prompts;
use crate::scheduling::{GapTrigger, PassGate, TriggerDecision};
use crate::stats::{PassStats, PassStatsSnapshot};

const PASS: &str = "consolidate";

/// Distills turns into durable facts and reconciles them with the vector store.
pub struct LongTermEngine {
    log: Arc<dyn IInteractionLog>,
    state: Arc<dyn IStateStore>,
    vectors: Arc<dyn IVectorStore>,
    oracle: Arc<dyn IReasoningOracle>,
    trigger: GapTrigger,
    retrieval_top_k: usize,
    candidate_top_k: usize,
    gate: PassGate,
    stats: PassStats,
}

impl LongTermEngine {
    pub fn new(
        log: Arc<dyn IInteractionLog>,
        state: Arc<dyn IStateStore>,
        vectors: Arc<dyn IVectorStore>,
        oracle: Arc<dyn IReasoningOracle>,
        config: &LongMemoryConfig,
        vector_config: &VectorConfig,
    ) -> Self {
        Self {
            log,
            state,
            vectors,
            oracle,
            trigger: GapTrigger::new(config.long_gap),
            retrieval_top_k: vector_config.max_top_k,
            candidate_top_k: vector_config.candidate_top_k.max(1),
            gate: PassGate::new(),
            stats: PassStats::new(),
        }
    }

    /// Ranked long-term memories for `query`. Does not take the pass lock.
    pub fn get_long_term_memory(&self, query: &str) -> EngramResult<Vec<MemoryItem>> {
        self.vectors.search(query, self.retrieval_top_k, 0.0)
    }

    pub fn watermark(&self) -> EngramResult<LongTermWatermark> {
        self.state.long_term_watermark()
    }

    pub fn stats(&self) -> PassStatsSnapshot {
        self.stats.snapshot()
    }

    /// Run a pass on a background thread, unless one is already queued.
    pub fn trigger_consolidate(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.gate.try_queue() {
            return None;
        }
        let engine = Arc::clone(self);
        Some(std::thread::spawn(move || {
            let _guard = engine.gate.enter_queued();
            let _ = engine.pass();
        }))
    }

    /// Run one pass now, waiting for any pass already in flight.
    pub fn consolidate_now(&self) -> EngramResult<ConsolidationOutcome> {
        let _guard = self.gate.enter();
        self.pass()
    }

    fn pass(&self) -> EngramResult<ConsolidationOutcome> {
        let mut watermark = UNSET_WATERMARK;
        let result = self.state.long_term_watermark().and_then(|current| {
            watermark = current.last_extraction_id;
            let span = consolidate_span!(watermark);
            let _entered = span.enter();
            self.run_pass(watermark)
        });

        match &result {
            Ok(ConsolidationOutcome::Skipped { pending, gap }) => {
                self.stats.record_skip();
                events::pass_skipped(PASS, *pending, *gap);
            }
            Ok(ConsolidationOutcome::EmptyWindow) => self.stats.record_skip(),
            Ok(ConsolidationOutcome::NoFacts { watermark }) => {
                self.stats.record_run();
                events::pass_completed(PASS, *watermark, 0);
            }
            Ok(ConsolidationOutcome::Applied(report)) => {
                self.stats.record_run();
                events::pass_completed(PASS, report.watermark, report.writes());
            }
            Err(err) => {
                self.stats.record_failure();
                events::pass_failed(PASS, watermark, err);
            }
        }
        result
    }

    fn run_pass(&self, watermark: i64) -> EngramResult<ConsolidationOutcome> {
        let pending = self.log.count_since(watermark)?;
        if self.trigger.evaluate(pending) == TriggerDecision::Skip {
            return Ok(ConsolidationOutcome::Skipped {
                pending,
                gap: self.trigger.gap(),
            });
        }

        // Read forward from the watermark so appends racing this pass land
        // after the window instead of shifting it.
        let window = self.log.since(watermark, pending)?;
        let Some(window_end) = window.last().map(|r| r.id) else {
            return Ok(ConsolidationOutcome::EmptyWindow);
        };

        let facts = self.extract_facts(&window)?;
        if facts.is_empty() {
            self.advance(window_end)?;
            return Ok(ConsolidationOutcome::NoFacts {
                watermark: window_end,
            });
        }

        let candidates = self.retrieve_candidates(&facts)?;
        debug!(
            facts = facts.len(),
            candidates = candidates.len(),
            "reconciling facts"
        );

        let reconcile_input = prompts::reconcile_input(&facts, &candidates);
        let reply = {
            let span = oracle_span!(self.oracle.name(), "reconcile");
            let _entered = span.enter();
            self.oracle.chat(prompts::RECONCILE_INSTRUCTION, &reconcile_input)?
        };
        let memory_events = parse::parse_memory_events(&reply)?;

        let report = apply_events(self.vectors.as_ref(), &memory_events, watermark, window_end)?;
        self.advance(window_end)?;
        Ok(ConsolidationOutcome::Applied(ApplyReport {
            facts: facts.len(),
            candidates: candidates.len(),
            ..report
        }))
    }

    fn extract_facts(&self, window: &[InteractionRecord]) -> EngramResult<Vec<Fact>> {
        let summary = self.state.summary_state()?;
        let input = prompts::fact_extraction_input(&summary, window);
        let reply = {
            let span = oracle_span!(self.oracle.name(), "fact_extraction");
            let _entered = span.enter();
            self.oracle.chat(prompts::FACT_EXTRACTION_INSTRUCTION, &input)?
        };
        Ok(parse::parse_facts(&reply)?)
    }

    /// Search once per fact in parallel; merge the hits deduplicated by id.
    fn retrieve_candidates(&self, facts: &[Fact]) -> EngramResult<Vec<MemoryItem>> {
        let per_fact: Vec<Vec<MemoryItem>> = facts
            .par_iter()
            .map(|fact| self.vectors.search(&fact.content, self.candidate_top_k, 0.0))
            .collect::<EngramResult<_>>()?;

        let mut by_id: BTreeMap<String, MemoryItem> = BTreeMap::new();
        for item in per_fact.into_iter().flatten() {
            by_id.entry(item.id.clone()).or_insert(item);
        }
        Ok(by_id.into_values().collect())
    }

    fn advance(&self, window_end: i64) -> EngramResult<()> {
        self.state
            .save_long_term_watermark(&LongTermWatermark::at(window_end))
    }
}
