//! Batch driver: every document in a directory, one at a time.

use crate::error::{CliError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use topica_domain::{CompletionProvider, Document, UsageLedger};
use topica_extractor::Extractor;
use topica_llm::LlmError;
use topica_writer::OutputWriter;
use tracing::{error, info, warn};

/// How a document ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Topics written and the source moved to the done directory
    Completed,
    /// Processing stopped; the source was left in place
    Failed(String),
}

/// Per-document result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Document name (file stem)
    pub name: String,
    /// Chunks sent
    pub chunks: usize,
    /// Distinct topics after merging
    pub topics: usize,
    /// Files created
    pub files_written: Vec<PathBuf>,
    /// Output units skipped because of their names
    pub files_skipped: usize,
    /// Chunks whose reply held no topic
    pub empty_chunks: usize,
    /// Extra attempts after service failures
    pub retries: u32,
    /// Extraction time in milliseconds
    pub processing_time_ms: u64,
    /// Chunk that stopped the document, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_chunk: Option<usize>,
    /// Final status
    #[serde(flatten)]
    pub status: DocumentStatus,
}

impl DocumentReport {
    fn failed(name: String, reason: String) -> Self {
        Self {
            name,
            chunks: 0,
            topics: 0,
            files_written: Vec::new(),
            files_skipped: 0,
            empty_chunks: 0,
            retries: 0,
            processing_time_ms: 0,
            failed_chunk: None,
            status: DocumentStatus::Failed(reason),
        }
    }

    /// Whether the document completed.
    pub fn is_completed(&self) -> bool {
        self.status == DocumentStatus::Completed
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// One entry per input document, in processing order
    pub documents: Vec<DocumentReport>,
    /// Token usage across the whole run
    pub usage: UsageLedger,
}

impl RunReport {
    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.documents.iter().filter(|d| !d.is_completed()).count()
    }

    /// Chunks sent across all documents.
    pub fn chunks_processed(&self) -> usize {
        self.documents.iter().map(|d| d.chunks).sum()
    }
}

/// Runs extraction over a directory of `.txt` files.
pub struct Runner<P>
where
    P: CompletionProvider<Error = LlmError>,
{
    extractor: Extractor<P>,
    writer: OutputWriter,
    output_dir: PathBuf,
    done_dir: PathBuf,
}

impl<P> Runner<P>
where
    P: CompletionProvider<Error = LlmError>,
{
    /// Create a new runner.
    pub fn new(
        extractor: Extractor<P>,
        writer: OutputWriter,
        output_dir: impl Into<PathBuf>,
        done_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extractor,
            writer,
            output_dir: output_dir.into(),
            done_dir: done_dir.into(),
        }
    }

    /// Process every `.txt` file directly inside `input_dir`, sorted by name.
    ///
    /// A failing document is logged and left in place; the run continues.
    /// Only problems with the directories themselves are returned as errors,
    /// including an `input_dir` that does not exist.
    pub fn run(&self, input_dir: &Path) -> Result<RunReport> {
        if !input_dir.is_dir() {
            return Err(CliError::InvalidInput(format!(
                "Input directory not found: {}",
                input_dir.display()
            )));
        }
        fs::create_dir_all(&self.output_dir)?;
        fs::create_dir_all(&self.done_dir)?;

        let files = list_documents(input_dir)?;
        info!("Found {} document(s) in {}", files.len(), input_dir.display());

        let mut report = RunReport::default();
        for path in files {
            let doc_report = self.process(&path, &mut report.usage);
            if let DocumentStatus::Failed(reason) = &doc_report.status {
                error!("Failed to process {}: {}", path.display(), reason);
            }
            report.documents.push(doc_report);
        }

        info!(
            "Processed {} document(s) in {} chunk(s), {} failed",
            report.documents.len(),
            report.chunks_processed(),
            report.failed()
        );
        for line in report.usage.summary().lines() {
            info!("{}", line);
        }
        Ok(report)
    }

    fn process(&self, path: &Path, ledger: &mut UsageLedger) -> DocumentReport {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                let name = Document::from_path(path, "").name().to_string();
                return DocumentReport::failed(name, format!("could not read file: {}", e));
            }
        };
        let document = Document::from_path(path, text);
        let name = document.name().to_string();
        info!("Processing {}", path.display());

        let extraction = match self.extractor.extract_document(&document, ledger) {
            Ok(extraction) => extraction,
            Err(e) => {
                return DocumentReport {
                    failed_chunk: e.chunk(),
                    ..DocumentReport::failed(name, e.to_string())
                }
            }
        };
        info!(
            "'{}': {} topic(s) from {} chunk(s) in {} ms",
            extraction.source_name,
            extraction.topics.len(),
            extraction.metadata.chunks_total,
            extraction.metadata.processing_time_ms
        );

        let outcome = match self.writer.write(&extraction.topics, &self.output_dir, &name) {
            Ok(outcome) => outcome,
            Err(e) => return DocumentReport::failed(name, e.to_string()),
        };
        for skipped in &outcome.skipped {
            warn!("Skipped '{}' for {}: {:?}", skipped.file_name, name, skipped.reason);
        }

        let report = DocumentReport {
            name,
            chunks: extraction.metadata.chunks_total,
            topics: extraction.topics.len(),
            files_written: outcome.written,
            files_skipped: outcome.skipped.len(),
            empty_chunks: extraction.metadata.empty_chunks,
            retries: extraction.metadata.retries,
            processing_time_ms: extraction.metadata.processing_time_ms,
            failed_chunk: None,
            status: DocumentStatus::Completed,
        };

        match self.move_to_done(path) {
            Ok(dest) => {
                info!("Moved {} to {}", path.display(), dest.display());
                report
            }
            Err(e) => DocumentReport {
                status: DocumentStatus::Failed(format!("could not move to done: {}", e)),
                ..report
            },
        }
    }

    fn move_to_done(&self, path: &Path) -> std::io::Result<PathBuf> {
        let file_name = path
            .file_name()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"))?;
        let dest = self.done_dir.join(file_name);
        fs::rename(path, &dest)?;
        Ok(dest)
    }
}

/// Regular `.txt` files directly inside `dir`, sorted by path.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_txt = path.extension().is_some_and(|ext| ext == "txt");
        if is_txt && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
