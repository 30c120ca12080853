//! Tracking for fire-and-forget passes so `flush` has something to join.

use std::sync::{Mutex, PoisonError};
use std::thread::JoinHandle;

use engram_core::errors::{EngramError, EngramResult};
use tracing::warn;

/// Join handles of background passes that may still be running.
#[derive(Default)]
pub struct BackgroundTasks {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `handle`, dropping handles of passes that already finished.
    pub fn track(&self, handle: JoinHandle<()>) {
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Handles not yet joined or reaped.
    pub fn in_flight(&self) -> usize {
        let handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Block until every tracked pass has finished, including passes
    /// tracked while this call is waiting. Every handle is joined even when
    /// some passes panicked; the panics are reported together.
    pub fn join_all(&self) -> EngramResult<()> {
        let mut panicked = 0;
        loop {
            let drained = {
                let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
                std::mem::take(&mut *handles)
            };
            if drained.is_empty() {
                break;
            }
            for handle in drained {
                if handle.join().is_err() {
                    warn!("background pass panicked");
                    panicked += 1;
                }
            }
        }
        if panicked > 0 {
            return Err(EngramError::BackgroundPanicked { panicked });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_all_waits_for_every_handle() {
        let tasks = BackgroundTasks::new();
        let (tx, rx) = std::sync::mpsc::channel();
        for i in 0..3 {
            let tx = tx.clone();
            tasks.track(std::thread::spawn(move || tx.send(i).unwrap()));
        }
        tasks.join_all().unwrap();
        drop(tx);
        assert_eq!(rx.iter().count(), 3);
        assert_eq!(tasks.in_flight(), 0);
    }

    #[test]
    fn panicked_passes_are_counted_and_the_rest_still_joined() {
        let tasks = BackgroundTasks::new();
        tasks.track(std::thread::spawn(|| panic!("pass blew up")));
        tasks.track(std::thread::spawn(|| {}));
        tasks.track(std::thread::spawn(|| panic!("pass blew up again")));

        let err = tasks.join_all().unwrap_err();
        assert!(matches!(err, EngramError::BackgroundPanicked { panicked: 2 }));
        // The drained handles are gone; the next flush is clean.
        tasks.join_all().unwrap();
    }
}
