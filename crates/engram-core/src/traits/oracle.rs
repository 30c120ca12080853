use std::sync::Arc;

use crate::errors::EngramResult;

/// Black-box text completion: one system instruction, one user message, one reply.
///
/// The oracle does not validate the reply against any schema; callers parse it.
pub trait IReasoningOracle: Send + Sync {
    fn chat(&self, system_instruction: &str, user_content: &str) -> EngramResult<String>;

    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;
}

impl<T: IReasoningOracle + ?Sized> IReasoningOracle for Arc<T> {
    fn chat(&self, system_instruction: &str, user_content: &str) -> EngramResult<String> {
        (**self).chat(system_instruction, user_content)
    }
    fn name(&self) -> &str { (**self).name() }
}
