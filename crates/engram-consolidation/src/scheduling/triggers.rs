//! Gap trigger: a pass runs once enough unprocessed turns have piled up.

/// Verdict for one trigger evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Fewer than `gap` turns pending; leave the watermark alone.
    Skip,
    Run,
}

/// Threshold policy shared by both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapTrigger {
    gap: usize,
}

impl GapTrigger {
    /// A gap of 0 is treated as 1: a pass never runs with nothing pending.
    pub fn new(gap: usize) -> Self {
        Self { gap: gap.max(1) }
    }

    pub fn gap(&self) -> usize {
        self.gap
    }

    pub fn evaluate(&self, pending: usize) -> TriggerDecision {
        if pending >= self.gap {
            TriggerDecision::Run
        } else {
            TriggerDecision::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_below_gap() {
        let t = GapTrigger::new(3);
        assert_eq!(t.evaluate(0), TriggerDecision::Skip);
        assert_eq!(t.evaluate(2), TriggerDecision::Skip);
    }

    #[test]
    fn runs_at_and_above_gap() {
        let t = GapTrigger::new(3);
        assert_eq!(t.evaluate(3), TriggerDecision::Run);
        assert_eq!(t.evaluate(10), TriggerDecision::Run);
    }

    #[test]
    fn zero_gap_still_needs_one_pending() {
        let t = GapTrigger::new(0);
        assert_eq!(t.gap(), 1);
        assert_eq!(t.evaluate(0), TriggerDecision::Skip);
        assert_eq!(t.evaluate(1), TriggerDecision::Run);
    }
}
