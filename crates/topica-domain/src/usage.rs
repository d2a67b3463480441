//! Token usage accounting
//!
//! Each completion reports a [`TokenUsage`]; a [`UsageLedger`] accumulates
//! them for a run. The ledger is an ordinary value owned by the caller, so
//! nothing is shared between runs.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Tokens consumed by a single completion call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens sent in the prompt
    #[serde(default)]
    pub prompt_tokens: u64,

    /// Tokens generated in the completion
    #[serde(default)]
    pub completion_tokens: u64,
}

impl TokenUsage {
    /// Create a usage record
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// Prompt plus completion tokens
    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        self.prompt_tokens += rhs.prompt_tokens;
        self.completion_tokens += rhs.completion_tokens;
    }
}

/// Running token totals for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLedger {
    /// Sum of all recorded usage
    pub totals: TokenUsage,

    /// Number of completion calls recorded
    pub calls: usize,
}

impl UsageLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the usage of one call
    pub fn record(&mut self, usage: TokenUsage) {
        self.totals += usage;
        self.calls += 1;
    }

    /// Total tokens sent
    pub fn prompt_tokens(&self) -> u64 {
        self.totals.prompt_tokens
    }

    /// Total tokens received
    pub fn completion_tokens(&self) -> u64 {
        self.totals.completion_tokens
    }

    /// Total tokens used
    pub fn total_tokens(&self) -> u64 {
        self.totals.total()
    }

    /// Human-readable end-of-run report
    pub fn summary(&self) -> String {
        [
            format!("Completion calls: {}", self.calls),
            format!("Total tokens sent: {}", self.prompt_tokens()),
            format!("Total tokens received: {}", self.completion_tokens()),
            format!("Total tokens used: {}", self.total_tokens()),
        ]
        .join("\n")
    }
}
