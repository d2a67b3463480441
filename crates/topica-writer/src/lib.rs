//! Topica Output Writer
//!
//! Persists a document's merged [`TopicMap`](topica_domain::TopicMap) as
//! `.txt` files.
//!
//! # Layout policy
//!
//! | Rendered length           | Files written                                  |
//! |---------------------------|------------------------------------------------|
//! | `< single_file_threshold` | one `{prefix}_{source}_{first_header}.txt`     |
//! | `>= single_file_threshold`| one `{header}.txt` per topic                   |
//!
//! Names are sanitized (spaces and path separators become `_`, colons and NUL
//! bytes are dropped), made unique with a `_1`, `_2`, ... suffix, and skipped with a
//! warning when longer than `max_filename_len` bytes.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use topica_domain::TopicMap;
//! use topica_writer::{OutputWriter, WriterConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut topics = TopicMap::new();
//! topics.append("Topic_Scope", "Applies to all licensees.\n");
//!
//! let writer = OutputWriter::new(WriterConfig::default());
//! let outcome = writer.write(&topics, Path::new("extracted_topics"), "statute")?;
//! println!("wrote {} file(s)", outcome.written.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod naming;
mod writer;

pub use config::WriterConfig;
pub use error::WriterError;
pub use naming::sanitize_stem;
pub use writer::{Layout, OutputWriter, SkipReason, SkippedUnit, WriteOutcome};
