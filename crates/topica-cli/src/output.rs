//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::runner::{DocumentStatus, RunReport};
use colored::*;
use topica_domain::{Chunk, TopicMap};
use topica_writer::WriteOutcome;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of a batch run.
    pub fn format_run_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_run_report_table(report)),
            OutputFormat::Quiet => Ok(report
                .documents
                .iter()
                .flat_map(|d| d.files_written.iter())
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_run_report_table(&self, report: &RunReport) -> String {
        if report.documents.is_empty() {
            return self.colorize("No documents found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record([
            "Document", "Chunks", "Topics", "Files", "Skipped", "Retries", "Time", "Status",
        ]);

        for doc in &report.documents {
            let status = match &doc.status {
                DocumentStatus::Completed => self.colorize("done", "green"),
                DocumentStatus::Failed(reason) => match doc.failed_chunk {
                    Some(chunk) => self.error(&format!("failed at chunk {}: {}", chunk, reason)),
                    None => self.error(&format!("failed: {}", reason)),
                },
            };
            builder.push_record([
                doc.name.clone(),
                doc.chunks.to_string(),
                doc.topics.to_string(),
                doc.files_written.len().to_string(),
                doc.files_skipped.to_string(),
                doc.retries.to_string(),
                format!("{:.1}s", doc.processing_time_ms as f64 / 1000.0),
                status,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let failed = report.failed();
        let processed = format!(
            "Processed {} document(s) in {} chunk(s)",
            report.documents.len(),
            report.chunks_processed()
        );
        let headline = if failed == 0 {
            self.success(&processed)
        } else {
            self.warning(&format!("{}, {} failed", processed, failed))
        };

        format!("{}\n{}\n{}", table, headline, report.usage.summary())
    }

    /// Format the chunk plan for a document.
    pub fn format_plan(&self, name: &str, chunks: &[Chunk]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = chunks
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "index": c.index,
                            "start": c.start,
                            "end": c.end,
                            "length": c.len(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "document": name,
                    "chunks": json,
                }))?)
            }
            OutputFormat::Quiet => Ok(chunks
                .iter()
                .map(|c| format!("{}\t{}", c.start, c.end))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if chunks.is_empty() {
                    return Ok(self.colorize("Document is empty; nothing to send.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Start", "End", "Length"]);
                for c in chunks {
                    builder.push_record([
                        c.index.to_string(),
                        c.start.to_string(),
                        c.end.to_string(),
                        c.len().to_string(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!(
                    "{}\n{}",
                    table,
                    self.info(&format!("'{}' splits into {} chunk(s)", name, chunks.len()))
                ))
            }
        }
    }

    /// Format parsed topics.
    pub fn format_topics(&self, topics: &TopicMap) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(topics)?),
            OutputFormat::Quiet => Ok(topics.headers().collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if topics.is_empty() {
                    return Ok(self.colorize("No topics found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Topic", "Characters", "Lines"]);
                for (header, content) in topics.iter() {
                    builder.push_record([
                        header.to_string(),
                        content.chars().count().to_string(),
                        content.lines().count().to_string(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(table.to_string())
            }
        }
    }

    /// Summarize a write outcome.
    pub fn write_result(&self, outcome: &WriteOutcome) -> String {
        let mut lines = vec![self.success(&format!(
            "Wrote {} file(s) ({:?})",
            outcome.written.len(),
            outcome.layout
        ))];
        for skipped in &outcome.skipped {
            lines.push(self.warning(&format!("Skipped {}: name too long", skipped.file_name)));
        }
        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
