//! OpenAI-compatible Provider Implementation
//!
//! Talks to any service exposing `POST {base_url}/chat/completions`
//! (OpenAI, vLLM, llama.cpp server, ...).
//!
//! # Features
//!
//! - Blocking HTTP with a per-request timeout
//! - Bearer-token authorization
//! - Deterministic sampling (temperature 0) so repeated calls agree
//! - Token usage read from the response envelope
//!
//! The provider never retries; callers decide what a failure means.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use topica_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new(
//!     "http://localhost:8000/v1",
//!     "meta-llama/Meta-Llama-3.1-8B-Instruct",
//!     Duration::from_secs(150),
//! )
//! .unwrap()
//! .with_api_key("EMPTY");
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use topica_domain::{Completion, CompletionProvider, TokenUsage};
use tracing::{debug, warn};

/// Default timeout for completion requests (150 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 150;

const TEMPERATURE: f32 = 0.0;
const TOP_P: f32 = 1.0;
const FREQUENCY_PENALTY: f32 = 0.1;
const PRESENCE_PENALTY: f32 = 0.1;

/// Provider for OpenAI-compatible chat completion APIs
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
    client: reqwest::blocking::Client,
}

/// Request body for the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat completions API
///
/// Every field is optional so a partial body surfaces as
/// `LlmError::InvalidResponse` rather than a decode error. `usage` is kept
/// raw and decoded separately; it never decides whether content is accepted.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<serde_json::Value>,
}

/// Token counters as sent on the wire; null or missing counts as zero
#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: Option<u64>,
    #[serde(default)]
    completion_tokens: Option<u64>,
}

impl From<WireUsage> for TokenUsage {
    fn from(wire: WireUsage) -> Self {
        TokenUsage::new(
            wire.prompt_tokens.unwrap_or_default(),
            wire.completion_tokens.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `base_url`: API root, e.g. `https://api.openai.com/v1`
    /// - `model`: Model identifier sent with each request
    /// - `timeout`: Upper bound for a single request
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Config` if the base URL or model is empty, the
    /// timeout is zero, or the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();

        if base_url.is_empty() {
            return Err(LlmError::Config("base URL is required".to_string()));
        }
        if model.is_empty() {
            return Err(LlmError::Config("model is required".to_string()));
        }
        if timeout.is_zero() {
            return Err(LlmError::Config("timeout must be greater than 0".to_string()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            model,
            api_key: None,
            timeout,
            client,
        })
    }

    /// Send `Authorization: Bearer <key>` with each request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = if key.is_empty() { None } else { Some(key) };
        self
    }

    /// Model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body<'a>(&'a self, system: &'a str, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout.as_secs())
        } else {
            LlmError::Communication(format!("Request failed: {}", e))
        }
    }
}

/// Extract the completion text and usage from a success body
pub(crate) fn parse_completion(body: &str) -> Result<Completion, LlmError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| {
            LlmError::InvalidResponse("missing choices[0].message.content".to_string())
        })?;

    Ok(Completion::new(text, decode_usage(response.usage)))
}

fn decode_usage(raw: Option<serde_json::Value>) -> TokenUsage {
    match raw {
        None | Some(serde_json::Value::Null) => TokenUsage::default(),
        Some(value) => match serde_json::from_value::<WireUsage>(value) {
            Ok(wire) => wire.into(),
            Err(e) => {
                warn!("Ignoring unreadable usage object: {}", e);
                TokenUsage::default()
            }
        },
    }
}

impl CompletionProvider for OpenAiProvider {
    type Error = LlmError;

    fn complete(&self, system: &str, user: &str) -> Result<Completion, Self::Error> {
        let url = self.completions_url();
        debug!("Sending chat completion request to {} ({} chars)", url, user.len());

        let mut request = self.client.post(&url).json(&self.request_body(system, user));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().map_err(|e| self.transport_error(e))?;
        let completion = parse_completion(&body)?;

        debug!(
            "Completion received: {} chars, {} prompt / {} completion tokens",
            completion.text.len(),
            completion.usage.prompt_tokens,
            completion.usage.completion_tokens
        );

        Ok(completion)
    }
}
