//! Decide the file layout for a topic map and write it

use crate::config::WriterConfig;
use crate::error::WriterError;
use crate::naming::{candidate, sanitize_stem};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use topica_domain::TopicMap;
use tracing::{debug, info, warn};

/// How a topic map is laid out on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Nothing to write
    Empty,
    /// All topics in one file
    SingleFile,
    /// One file per topic
    PerTopic,
}

/// Why an output unit was not written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The (unique) file name is longer than allowed
    FilenameTooLong {
        /// Length of the name in bytes
        len: usize,
        /// Configured maximum
        max: usize,
    },
}

/// An output unit that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUnit {
    /// Topic header the unit was named after
    pub header: String,
    /// The rejected file name
    pub file_name: String,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Result of writing one document's topics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Layout that was chosen
    pub layout: Layout,
    /// Files created, in topic order
    pub written: Vec<PathBuf>,
    /// Units not written
    pub skipped: Vec<SkippedUnit>,
}

impl WriteOutcome {
    fn new(layout: Layout) -> Self {
        Self {
            layout,
            written: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Writes merged topic maps to an output directory
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    config: WriterConfig,
}

impl OutputWriter {
    /// Create a writer
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Layout [`write`](Self::write) would choose for `topics`
    pub fn layout_for(&self, topics: &TopicMap) -> Layout {
        if topics.is_empty() {
            Layout::Empty
        } else if topics.rendered_len() < self.config.single_file_threshold {
            Layout::SingleFile
        } else {
            Layout::PerTopic
        }
    }

    /// Write `topics` for document `source_name` into `output_dir`
    ///
    /// Existing files are never overwritten. Over-long names are skipped and
    /// reported in the outcome; only filesystem failures are errors.
    pub fn write(
        &self,
        topics: &TopicMap,
        output_dir: &Path,
        source_name: &str,
    ) -> Result<WriteOutcome, WriterError> {
        let layout = self.layout_for(topics);
        let mut outcome = WriteOutcome::new(layout);

        let first_header = match topics.first_header() {
            Some(header) => header,
            None => {
                debug!("No topics for '{}', nothing to write", source_name);
                return Ok(outcome);
            }
        };

        fs::create_dir_all(output_dir).map_err(|e| WriterError::io(output_dir, e))?;
        info!(
            "Saving {} topic(s) for '{}' to {} ({:?})",
            topics.len(),
            source_name,
            output_dir.display(),
            layout
        );

        if layout == Layout::SingleFile {
            let stem = sanitize_stem(&format!(
                "{}_{}_{}",
                self.config.single_file_prefix, source_name, first_header
            ));
            self.write_unit(output_dir, &stem, first_header, &topics.render(), &mut outcome)?;
        } else {
            for (header, content) in topics.iter() {
                let contents = format!("{}\n\n{}", header, content);
                self.write_unit(output_dir, &sanitize_stem(header), header, &contents, &mut outcome)?;
            }
        }

        Ok(outcome)
    }

    /// Create the first free `stem[_n].txt` and write `contents` to it
    fn write_unit(
        &self,
        dir: &Path,
        stem: &str,
        header: &str,
        contents: &str,
        outcome: &mut WriteOutcome,
    ) -> Result<(), WriterError> {
        let max = self.config.max_filename_len;

        let mut n = 0;
        loop {
            let file_name = candidate(stem, n);
            n += 1;

            if file_name.len() > max {
                warn!(
                    "Filename '{}' exceeds the maximum length of {} bytes. Skipping file creation.",
                    file_name, max
                );
                outcome.skipped.push(SkippedUnit {
                    header: header.to_string(),
                    reason: SkipReason::FilenameTooLong {
                        len: file_name.len(),
                        max,
                    },
                    file_name,
                });
                return Ok(());
            }

            let path = dir.join(&file_name);
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(WriterError::io(path, e)),
            };

            file.write_all(contents.as_bytes())
                .map_err(|e| WriterError::io(&path, e))?;
            info!("Saved {}", path.display());
            outcome.written.push(path);
            return Ok(());
        }
    }
}
