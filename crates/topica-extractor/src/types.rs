//! Result types for extraction

use topica_domain::{TokenUsage, TopicMap};

/// Merged topics for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentExtraction {
    /// Source document name
    pub source_name: String,

    /// Topics merged across all chunks, in first-seen order
    pub topics: TopicMap,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// Metadata about a document extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMetadata {
    /// Number of chunks the document was cut into
    pub chunks_total: usize,

    /// Chunks whose output contained no topic header
    pub empty_chunks: usize,

    /// Tokens spent on this document
    pub usage: TokenUsage,

    /// Extra attempts made after service failures
    pub retries: u32,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,
}
