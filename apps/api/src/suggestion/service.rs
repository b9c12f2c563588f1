//! Remote Suggestion Service: the pluggable backend that turns a combined
//! prompt into a `SuggestionReply`.
//!
//! Default: `LlmSuggestionService` over the Anthropic client. Tests swap in
//! scripted implementations. `AppState` holds an `Arc<dyn SuggestionService>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::llm_client::{LlmClient, LlmError};
use crate::suggestion::prompts::suggestion_system;

/// What the service hands back. `output` is candidate markup, `response` is an
/// advisory message for the user. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub output: Option<String>,
}

/// The controller only cares that the request failed.
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("suggestion request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("suggestion task aborted: {0}")]
    Aborted(String),
}

#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn suggest(&self, prompt: &str) -> Result<SuggestionReply, SuggestionError>;
}

pub struct LlmSuggestionService {
    llm: LlmClient,
    system: String,
}

impl LlmSuggestionService {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system: suggestion_system(),
        }
    }
}

#[async_trait]
impl SuggestionService for LlmSuggestionService {
    async fn suggest(&self, prompt: &str) -> Result<SuggestionReply, SuggestionError> {
        let reply: SuggestionReply = self.llm.call_json(prompt, &self.system).await?;
        debug!(
            "Suggestion reply: response_len={}, output_len={}",
            reply.response.len(),
            reply.output.as_deref().map_or(0, str::len)
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_deserializes_full() {
        let reply: SuggestionReply =
            serde_json::from_str(r#"{"response": "Tightened wording", "output": "<p>B</p>"}"#)
                .unwrap();
        assert_eq!(reply.response, "Tightened wording");
        assert_eq!(reply.output.as_deref(), Some("<p>B</p>"));
    }

    #[test]
    fn test_reply_fields_default_when_missing() {
        let reply: SuggestionReply = serde_json::from_str(r#"{"response": "Nothing to do"}"#).unwrap();
        assert!(reply.output.is_none());

        let reply: SuggestionReply = serde_json::from_str(r#"{"output": null}"#).unwrap();
        assert_eq!(reply, SuggestionReply::default());
    }
}
