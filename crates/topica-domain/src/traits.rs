//! Trait definitions for external interactions
//!
//! These traits define the boundary between the pipeline and the services it
//! calls. Implementations live in other crates (`topica-llm`).

use crate::usage::TokenUsage;

/// Raw model output for one request, with the tokens it cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The model's text, unparsed
    pub text: String,

    /// Token usage reported by the service (zero when absent)
    pub usage: TokenUsage,
}

impl Completion {
    /// Create a completion
    pub fn new(text: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// Trait for text-completion services
///
/// Implemented by the infrastructure layer (topica-llm). One call sends one
/// system instruction and one user message; implementations must not retry.
pub trait CompletionProvider {
    /// Error type for completion calls
    type Error;

    /// Send `system` and `user` to the model and return its raw reply
    fn complete(&self, system: &str, user: &str) -> Result<Completion, Self::Error>;
}
