//! Topica LLM Provider Layer
//!
//! Implementations of the `CompletionProvider` trait from `topica-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible `/chat/completions` endpoint
//!
//! # Examples
//!
//! ```
//! use topica_llm::MockProvider;
//! use topica_domain::CompletionProvider;
//!
//! let provider = MockProvider::new("Topic_A\nfoo");
//! let result = provider.complete("system", "chunk text").unwrap();
//! assert_eq!(result.text, "Topic_A\nfoo");
//! ```

#![warn(missing_docs)]

pub mod openai;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use topica_domain::{Completion, CompletionProvider, TokenUsage};

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code returned by the service
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// No response within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Success status but the body lacks the expected content
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider misconfigured
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Scripted outcome for a [`MockProvider`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Reply with this text
    Text(String),
    /// Fail as if the service returned this HTTP status
    ServiceFailure(u16),
    /// Fail as if the body had no `choices[0].message.content`
    Malformed,
}

impl MockReply {
    fn into_result(self, usage: TokenUsage) -> Result<Completion, LlmError> {
        match self {
            MockReply::Text(text) => Ok(Completion::new(text, usage)),
            MockReply::ServiceFailure(status) => Err(LlmError::Http {
                status,
                body: "Mock error".to_string(),
            }),
            MockReply::Malformed => Err(LlmError::InvalidResponse(
                "missing choices[0].message.content".to_string(),
            )),
        }
    }
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured replies without making any network calls. Scripted
/// replies are consumed first, then replies keyed by the exact user message,
/// then the default reply.
///
/// # Examples
///
/// ```
/// use topica_llm::{MockProvider, MockReply};
/// use topica_domain::CompletionProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("chunk one", "Topic_One\n1");
/// provider.enqueue(MockReply::ServiceFailure(503));
///
/// assert!(provider.complete("sys", "chunk one").is_err());
/// assert_eq!(provider.complete("sys", "chunk one").unwrap().text, "Topic_One\n1");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    usage: TokenUsage,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    script: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    /// Create a new MockProvider with a fixed reply for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            usage: TokenUsage::default(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Report this usage on every successful call
    pub fn with_usage(mut self, prompt_tokens: u64, completion_tokens: u64) -> Self {
        self.usage = TokenUsage::new(prompt_tokens, completion_tokens);
        self
    }

    /// Add a specific reply for a given user message
    pub fn add_response(&mut self, user: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(user.into(), MockReply::Text(response.into()));
    }

    /// Configure to fail with HTTP 500 for a specific user message
    pub fn add_error(&mut self, user: impl Into<String>) {
        lock(&self.responses).insert(user.into(), MockReply::ServiceFailure(500));
    }

    /// Queue a reply for the next call, ahead of keyed and default replies
    pub fn enqueue(&self, reply: MockReply) {
        lock(&self.script).push_back(reply);
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// User messages received so far, in call order
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    fn complete(&self, _system: &str, user: &str) -> Result<Completion, Self::Error> {
        *lock(&self.call_count) += 1;
        lock(&self.requests).push(user.to_string());

        if let Some(reply) = lock(&self.script).pop_front() {
            return reply.into_result(self.usage);
        }

        if let Some(reply) = lock(&self.responses).get(user) {
            return reply.clone().into_result(self.usage);
        }

        Ok(Completion::new(self.default_response.clone(), self.usage))
    }
}
