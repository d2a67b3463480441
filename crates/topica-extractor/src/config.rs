//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;
use topica_llm::openai::DEFAULT_TIMEOUT_SECS;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Chunk length (characters)
    pub chunk_size: usize,

    /// Characters repeated between consecutive chunks
    pub overlap_size: usize,

    /// Maximum time for a single completion request (seconds)
    pub request_timeout_secs: u64,

    /// Extra attempts for a chunk after a service failure
    pub chunk_retries: u32,

    /// Base delay before the first retry (milliseconds), doubled per attempt
    pub retry_backoff_ms: u64,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Delay before retry number `attempt` (1-based): base, 2×base, 4×base, ...
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.overlap_size >= self.chunk_size {
            return Err(format!(
                "overlap_size ({}) must be smaller than chunk_size ({})",
                self.overlap_size, self.chunk_size
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// 2000-character chunks with 200 characters of overlap
    fn default() -> Self {
        Self {
            chunk_size: 2_000,
            overlap_size: 200,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            chunk_retries: 0,
            retry_backoff_ms: 1_000,
        }
    }
}

impl ExtractorConfig {
    /// Small-context preset: shorter chunks for models with tight input limits
    pub fn small_context() -> Self {
        Self {
            chunk_size: 1_000,
            overlap_size: 100,
            request_timeout_secs: 60,
            ..Self::default()
        }
    }

    /// Large-context preset: longer chunks, fewer calls, one retry
    pub fn large_context() -> Self {
        Self {
            chunk_size: 6_000,
            overlap_size: 400,
            request_timeout_secs: 300,
            chunk_retries: 1,
            ..Self::default()
        }
    }
}
