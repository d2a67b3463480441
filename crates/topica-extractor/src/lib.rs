//! Topica Extractor
//!
//! Turns plain-text documents into merged topic maps using an LLM.
//!
//! # Architecture
//!
//! ```text
//! Document → TextChunker → CompletionProvider → parse_topics → TopicMap::merge
//! ```
//!
//! # Key Features
//!
//! - **Overlapping chunks**: fixed character windows with repeated context
//! - **Verbatim segmentation prompt**: the model copies text under `Topic_` headers
//! - **Total parser**: malformed output degrades to fewer topics, never an error
//! - **Ordered merge**: repeated headers across chunks concatenate in chunk order
//! - **Explicit accounting**: token usage recorded into a caller-owned ledger
//!
//! # Example Usage
//!
//! ```
//! use topica_domain::{Document, UsageLedger};
//! use topica_extractor::{Extractor, ExtractorConfig};
//! use topica_llm::MockProvider;
//!
//! let llm = MockProvider::new("Topic_A\nfoo\nTopic_B\nbar");
//! let extractor = Extractor::new(llm, ExtractorConfig::default()).unwrap();
//!
//! let mut ledger = UsageLedger::new();
//! let doc = Document::new("report", "x".repeat(3500));
//! let result = extractor.extract_document(&doc, &mut ledger).unwrap();
//!
//! assert_eq!(result.metadata.chunks_total, 2);
//! assert_eq!(result.topics.get("Topic_A"), Some("foo\nfoo\n"));
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use chunking::{chunk_text, TextChunker};
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_topics;
pub use prompt::{is_topic_header, SEGMENTATION_PROMPT, TOPIC_MARKER};
pub use types::{DocumentExtraction, ExtractionMetadata};
