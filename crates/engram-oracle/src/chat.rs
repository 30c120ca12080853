use std::time::Duration;

use engram_core::config::OracleConfig;
use engram_core::errors::{EngramResult, OracleError};
use engram_core::traits::IReasoningOracle;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Chat-completions backed reasoning oracle.
pub struct ChatOracle {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatOracle {
    pub fn from_config(config: &OracleConfig) -> EngramResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleError::Transport {
                reason: format!("HTTP client error: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request<'a>(&'a self, system_instruction: &'a str, user_content: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
        }
    }
}

/// First non-empty choice content, or `EmptyReply`.
fn first_reply(response: ChatResponse) -> Result<String, OracleError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(OracleError::EmptyReply)
}

impl IReasoningOracle for ChatOracle {
    fn chat(&self, system_instruction: &str, user_content: &str) -> EngramResult<String> {
        debug!(model = %self.model, prompt_len = user_content.len(), "oracle request");

        let mut builder = self
            .client
            .post(&self.endpoint)
            .json(&self.request(system_instruction, user_content));
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }
        let response = builder.send().map_err(|e| OracleError::Transport {
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: ChatResponse = response.json().map_err(|e| OracleError::Transport {
            reason: format!("malformed completion body: {e}"),
        })?;
        Ok(first_reply(parsed)?)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
