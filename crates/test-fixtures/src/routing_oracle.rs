use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use engram_core::errors::{EngramResult, OracleError};
use engram_core::traits::IReasoningOracle;

/// Oracle double that answers by system instruction.
///
/// Each instruction has its own reply queue, so engines running on separate
/// threads get the reply meant for them regardless of scheduling. When a
/// queue runs dry its last reply repeats.
#[derive(Default)]
pub struct RoutingOracle {
    routes: Mutex<HashMap<String, VecDeque<String>>>,
    last: Mutex<HashMap<String, String>>,
    calls: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl RoutingOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `reply` for calls made with `instruction`.
    pub fn route(&self, instruction: &str, reply: impl Into<String>) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(instruction.to_string())
            .or_default()
            .push_back(reply.into());
        self
    }

    /// Calls made with `instruction`.
    pub fn calls_for(&self, instruction: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(instruction)
            .copied()
            .unwrap_or(0)
    }

    pub fn call_count(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl IReasoningOracle for RoutingOracle {
    fn chat(&self, system_instruction: &str, _user_content: &str) -> EngramResult<String> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .calls
            .lock()
            .unwrap()
            .entry(system_instruction.to_string())
            .or_default() += 1;

        let next = self
            .routes
            .lock()
            .unwrap()
            .get_mut(system_instruction)
            .and_then(VecDeque::pop_front);
        let mut last = self.last.lock().unwrap();
        match next {
            Some(reply) => {
                last.insert(system_instruction.to_string(), reply.clone());
                Ok(reply)
            }
            None => last.get(system_instruction).cloned().ok_or_else(|| {
                OracleError::Transport {
                    reason: "no route for instruction".to_string(),
                }
                .into()
            }),
        }
    }

    fn name(&self) -> &str {
        "routing"
    }
}
