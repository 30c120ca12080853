//! Rolling summary maintenance.

use std::sync::Arc;
use std::thread::JoinHandle;

use engram_core::config::ContextMemoryConfig;
use engram_core::constants::UNSET_WATERMARK;
use engram_core::errors::{EngramResult, OracleError};
use engram_core::models::SummaryState;
use engram_core::traits::{IInteractionLog, IReasoningOracle, IStateStore};
use engram_observability::tracing_setup::events;
use engram_observability::{oracle_span, summarize_span};

use crate::outcome::SummaryOutcome;
use crate::prompts;
use crate::scheduling::{GapTrigger, PassGate, TriggerDecision};
use crate::stats::{PassStats, PassStatsSnapshot};

const PASS: &str = "summarize";

/// Folds unsummarized turns into [`SummaryState`] once `summary_gap` of them
/// have accumulated. Passes are serialized by a [`PassGate`].
pub struct SummarizationEngine {
    log: Arc<dyn IInteractionLog>,
    state: Arc<dyn IStateStore>,
    oracle: Arc<dyn IReasoningOracle>,
    trigger: GapTrigger,
    gate: PassGate,
    stats: PassStats,
}

impl SummarizationEngine {
    pub fn new(
        log: Arc<dyn IInteractionLog>,
        state: Arc<dyn IStateStore>,
        oracle: Arc<dyn IReasoningOracle>,
        config: &ContextMemoryConfig,
    ) -> Self {
        Self {
            log,
            state,
            oracle,
            trigger: GapTrigger::new(config.summary_gap),
            gate: PassGate::new(),
            stats: PassStats::new(),
        }
    }

    /// Current summary state (one consistent read, no lock).
    pub fn get_summary(&self) -> EngramResult<SummaryState> {
        self.state.summary_state()
    }

    pub fn stats(&self) -> PassStatsSnapshot {
        self.stats.snapshot()
    }

    /// Run a pass on a background thread. Returns `None` when a pass is
    /// already queued; that pass will pick up the same turns. Errors are
    /// logged by the pass itself; the handle only signals completion.
    pub fn trigger_summarize(self: &Arc<Self>) -> Option<JoinHandle<()>> {
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
    pub fn summarize_now(&self) -> EngramResult<SummaryOutcome> {
        let _guard = self.gate.enter();
        self.pass()
    }

    fn pass(&self) -> EngramResult<SummaryOutcome> {
        let mut watermark = UNSET_WATERMARK;
        let result = self.state.summary_state().and_then(|state| {
            watermark = state.last_summary_id;
            let span = summarize_span!(watermark);
            let _entered = span.enter();
            self.fold(state)
        });

        match &result {
            Ok(SummaryOutcome::Skipped { pending, gap }) => {
                self.stats.record_skip();
                events::pass_skipped(PASS, *pending, *gap);
            }
            Ok(SummaryOutcome::Summarized { folded, watermark }) => {
                self.stats.record_run();
                events::pass_completed(PASS, *watermark, *folded);
            }
            Err(err) => {
                self.stats.record_failure();
                events::pass_failed(PASS, watermark, err);
            }
        }
        result
    }

    fn fold(&self, state: SummaryState) -> EngramResult<SummaryOutcome> {
        let pending = self.log.count_since(state.last_summary_id)?;
        if self.trigger.evaluate(pending) == TriggerDecision::Skip {
            return Ok(SummaryOutcome::Skipped {
                pending,
                gap: self.trigger.gap(),
            });
        }

        let records = self.log.since(state.last_summary_id, pending)?;
        let Some(last) = records.last() else {
            return Ok(SummaryOutcome::Skipped {
                pending: 0,
                gap: self.trigger.gap(),
            });
        };
        let last_id = last.id;

        let input = prompts::fold_summary_input(&state.summary, &records);
        let reply = {
            let span = oracle_span!(self.oracle.name(), "fold_summary");
            let _entered = span.enter();
            self.oracle.chat(prompts::FOLD_SUMMARY_INSTRUCTION, &input)?
        };
        let summary = reply.trim();
        if summary.is_empty() {
            return Err(OracleError::EmptyReply.into());
        }

        self.state
            .save_summary_state(&SummaryState::advanced(summary.to_string(), last_id))?;
        Ok(SummaryOutcome::Summarized {
            folded: records.len(),
            watermark: last_id,
        })
    }
}
