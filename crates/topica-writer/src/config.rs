//! Configuration for the output writer

use serde::{Deserialize, Serialize};

/// Configuration for the output writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Rendered length (characters) below which everything goes in one file
    pub single_file_threshold: usize,

    /// Longest file name (bytes) that will be written
    pub max_filename_len: usize,

    /// Leading component of single-file names
    pub single_file_prefix: String,
}

impl WriterConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_filename_len == 0 {
            return Err("max_filename_len must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            single_file_threshold: 1_800,
            max_filename_len: 255,
            single_file_prefix: "Topic".to_string(),
        }
    }
}
