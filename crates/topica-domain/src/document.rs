//! Source documents and the chunks cut from them

use std::path::Path;

/// A plain-text source document
///
/// The text is immutable once read; chunks borrow nothing from it and can be
/// produced any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    text: String,
}

impl Document {
    /// Create a document from a source name and its full text
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Build a document named after the file stem of `path`
    ///
    /// `report.txt` becomes `report`; a path without a stem falls back to the
    /// full file name.
    pub fn from_path(path: &Path, text: impl Into<String>) -> Self {
        let name = path
            .file_stem()
            .or_else(|| path.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name, text)
    }

    /// Source name (file stem)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A contiguous window of a document's text
///
/// Offsets count characters, not bytes, so a window never splits a code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk in the document's chunk sequence
    pub index: usize,

    /// Character offset of the first character (inclusive)
    pub start: usize,

    /// Character offset one past the last character (exclusive)
    pub end: usize,

    /// The chunk text
    pub text: String,
}

impl Chunk {
    /// Number of characters in the chunk
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the chunk spans no characters
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
