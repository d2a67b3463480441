//! Error types for the Extractor

use thiserror::Error;
use topica_llm::LlmError;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Invalid chunking or request parameters
    #[error("Configuration error: {0}")]
    Config(String),

    /// The completion service failed (status, transport, or timeout)
    #[error("Service error on '{document}' chunk {chunk}: {source}")]
    Service {
        /// Source document name
        document: String,
        /// Zero-based chunk index
        chunk: usize,
        /// Underlying provider error
        #[source]
        source: LlmError,
    },

    /// The service answered but without usable content
    #[error("Malformed response on '{document}' chunk {chunk}: {message}")]
    MalformedResponse {
        /// Source document name
        document: String,
        /// Zero-based chunk index
        chunk: usize,
        /// What was missing
        message: String,
    },
}

impl ExtractorError {
    /// Classify a provider error for a given document and chunk
    pub fn from_llm(document: &str, chunk: usize, error: LlmError) -> Self {
        match error {
            LlmError::InvalidResponse(message) => ExtractorError::MalformedResponse {
                document: document.to_string(),
                chunk,
                message,
            },
            LlmError::Config(message) => ExtractorError::Config(message),
            source => ExtractorError::Service {
                document: document.to_string(),
                chunk,
                source,
            },
        }
    }

    /// Index of the failing chunk, if the error is tied to one
    pub fn chunk(&self) -> Option<usize> {
        match self {
            ExtractorError::Service { chunk, .. }
            | ExtractorError::MalformedResponse { chunk, .. } => Some(*chunk),
            ExtractorError::Config(_) => None,
        }
    }

    /// Whether another attempt at the same chunk could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExtractorError::Service { .. })
    }
}
