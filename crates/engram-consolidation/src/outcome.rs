//! What a pass did.

/// Result of one summarization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Too few turns pending; nothing changed.
    Skipped { pending: usize, gap: usize },
    /// `folded` turns were folded in and the watermark moved to `watermark`.
    Summarized { folded: usize, watermark: i64 },
}

/// Result of one long-term consolidation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsolidationOutcome {
    /// Too few turns pending; nothing changed.
    Skipped { pending: usize, gap: usize },
    /// The log returned no records past the watermark.
    EmptyWindow,
    /// Extraction found no facts; the watermark advanced, the index is untouched.
    NoFacts { watermark: i64 },
    /// Facts were reconciled and the events applied.
    Applied(ApplyReport),
}

/// Tally of one applied reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub facts: usize,
    pub candidates: usize,
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
    /// Ids written by ADD events, in application order.
    pub added_ids: Vec<String>,
    pub watermark: i64,
}

impl ApplyReport {
    /// Number of events that touched the vector store.
    pub fn writes(&self) -> usize {
        self.added + self.updated + self.deleted
    }
}
