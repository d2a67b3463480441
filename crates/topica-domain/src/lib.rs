//! Topica Domain Layer
//!
//! Core data model for the chunk → extract → reassemble pipeline. Everything
//! here is pure: no I/O, no network, no logging.
//!
//! ## Key Concepts
//!
//! - **Document**: a source file's name and immutable text
//! - **Chunk**: an overlapping character window over a document
//! - **TopicMap**: ordered topic header → accumulated content
//! - **TokenUsage / UsageLedger**: token accounting per call and per run
//!
//! ## Architecture
//!
//! Infrastructure (HTTP providers, filesystem writers) lives in other crates
//! and talks to the domain through the traits in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod topic;
pub mod traits;
pub mod usage;

// Re-exports for convenience
pub use document::{Chunk, Document};
pub use topic::TopicMap;
pub use traits::{Completion, CompletionProvider};
pub use usage::{TokenUsage, UsageLedger};
