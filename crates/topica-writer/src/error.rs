//! Error types for the output writer

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a document's output from being written
///
/// Over-long file names are not errors; see
/// [`SkipReason`](crate::SkipReason).
#[derive(Error, Debug)]
pub enum WriterError {
    /// Filesystem failure
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being created or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl WriterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WriterError::Io {
            path: path.into(),
            source,
        }
    }
}
