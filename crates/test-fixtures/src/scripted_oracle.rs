use std::collections::VecDeque;
use std::sync::Mutex;

use engram_core::errors::{EngramResult, OracleError};
use engram_core::traits::IReasoningOracle;

/// One recorded `chat` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleCall {
    pub system_instruction: String,
    pub user_content: String,
}

enum Scripted {
    Reply(String),
    Fail(u16),
}

/// Oracle double: pops queued replies in order and records every call.
///
/// An empty queue answers with a transport error so a test that forgot to
/// script a reply fails loudly instead of hanging.
#[derive(Default)]
pub struct ScriptedOracle {
    queue: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<OracleCall>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with the given replies already queued.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let oracle = Self::new();
        for reply in replies {
            oracle.push_reply(reply);
        }
        oracle
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.queue
            .lock()
            .unwrap()
            .push_back(Scripted::Reply(reply.into()));
    }

    /// Queue a failure answered as `OracleError::Status { status }`.
    pub fn push_failure(&self, status: u16) {
        self.queue.lock().unwrap().push_back(Scripted::Fail(status));
    }

    pub fn calls(&self) -> Vec<OracleCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Replies still waiting to be consumed.
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
}

impl IReasoningOracle for ScriptedOracle {
    fn chat(&self, system_instruction: &str, user_content: &str) -> EngramResult<String> {
        self.calls.lock().unwrap().push(OracleCall {
            system_instruction: system_instruction.to_string(),
            user_content: user_content.to_string(),
        });
        match self.queue.lock().unwrap().pop_front() {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Fail(status)) => Err(OracleError::Status {
                status,
                body: "scripted failure".to_string(),
            }
            .into()),
            None => Err(OracleError::Transport {
                reason: "no scripted reply queued".to_string(),
            }
            .into()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
