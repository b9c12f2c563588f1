//! LLM Client: the only module that talks to the Anthropic API.
//!
//! Suggestion requests reach the model through `suggestion::service`, which
//! wraps `call_json` behind the `SuggestionService` trait.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all suggestion calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Outcome of a single HTTP round trip to the Messages API.
enum Attempt {
    Done(LlmResponse),
    /// 429, 5xx or a transport error: worth another try.
    Retry(LlmError),
}

/// Wraps the Anthropic Messages API with retry logic and structured output helpers.
/// Transport timeouts live here; callers never time out a request themselves.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Sends one prompt, retrying 429/5xx/transport failures with exponential
    /// backoff. Other non-2xx statuses fail immediately.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error = None;
        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "LLM attempt {attempt}/{MAX_RETRIES} failed, retrying in {}ms",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self.attempt(&body).await? {
                Attempt::Done(response) => return Ok(response),
                Attempt::Retry(e) => last_error = Some(e),
            }
        }

        Err(exhausted(last_error))
    }

    async fn attempt(&self, body: &AnthropicRequest<'_>) -> Result<Attempt, LlmError> {
        let response = match self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("LLM transport error: {e}");
                return Ok(Attempt::Retry(LlmError::Http(e)));
            }
        };

        let status = response.status();
        if status.is_success() {
            let parsed: LlmResponse = response.json().await?;
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                parsed.usage.input_tokens, parsed.usage.output_tokens
            );
            return Ok(Attempt::Done(parsed));
        }

        let raw = response.text().await.unwrap_or_default();
        let error = LlmError::Api {
            status: status.as_u16(),
            message: api_error_message(raw),
        };
        if is_retryable(status) {
            warn!("LLM API returned {status}");
            Ok(Attempt::Retry(error))
        } else {
            Err(error)
        }
    }

    /// Calls the model and deserializes its text reply as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        serde_json::from_str(strip_json_fences(text)).map_err(LlmError::Parse)
    }
}

/// Error to report once every attempt was used up. A final 429 is reported as
/// rate limiting; anything else keeps its own error.
fn exhausted(last_error: Option<LlmError>) -> LlmError {
    match last_error {
        Some(LlmError::Api { status: 429, .. }) | None => LlmError::RateLimited {
            retries: MAX_RETRIES,
        },
        Some(e) => e,
    }
}

/// Pulls `error.message` out of an Anthropic error body, falling back to the raw body.
fn api_error_message(raw: String) -> String {
    serde_json::from_str::<AnthropicError>(&raw)
        .map(|e| e.error.message)
        .unwrap_or(raw)
}

/// Delay before retry `attempt` (1-based): 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 * (1 << attempt.saturating_sub(1)))
}

fn is_retryable(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Strips a ```json (or bare ```) fence around model output, if present.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let inner = inner.trim_start();
    inner.strip_suffix("```").map_or(inner, str::trim)
}
