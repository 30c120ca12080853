//! One running pass plus at most one queued behind it, per engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serializes passes and coalesces background triggers.
///
/// A queued pass has not read its watermark yet, so it will see every turn
/// appended before a trigger that found the slot taken. Such a trigger can
/// be dropped without losing work.
#[derive(Debug, Default)]
pub struct PassGate {
    lock: Mutex<()>,
    queued: AtomicBool,
}

impl PassGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the queued slot. False if a pass is already waiting.
    pub fn try_queue(&self) -> bool {
        !self.queued.swap(true, Ordering::SeqCst)
    }

    /// Wait for the pass lock. The lock guards no data, so a poisoned lock
    /// is still usable.
    pub fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for the pass lock, then free the queued slot before the pass
    /// reads any state.
    pub fn enter_queued(&self) -> MutexGuard<'_, ()> {
        let guard = self.enter();
        self.queued.store(false, Ordering::SeqCst);
        guard
    }

    pub fn is_queued(&self) -> bool {
        self.queued.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_queue_is_refused_until_the_pass_starts() {
        let gate = PassGate::new();
        assert!(gate.try_queue());
        assert!(!gate.try_queue());
        assert!(gate.is_queued());

        let guard = gate.enter_queued();
        assert!(!gate.is_queued());
        assert!(gate.try_queue());
        drop(guard);
    }

    #[test]
    fn direct_entry_leaves_the_slot_alone() {
        let gate = PassGate::new();
        assert!(gate.try_queue());
        drop(gate.enter());
        assert!(gate.is_queued());
    }
}
