//! Core Extractor implementation

use crate::chunking::TextChunker;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_topics;
use crate::prompt::SEGMENTATION_PROMPT;
use crate::types::{DocumentExtraction, ExtractionMetadata};
use std::thread;
use std::time::Instant;
use topica_domain::{Chunk, CompletionProvider, Document, TokenUsage, TopicMap, UsageLedger};
use topica_llm::LlmError;
use tracing::{debug, info, warn};

/// The Extractor turns a document into a merged topic map
///
/// Chunks are sent one at a time, strictly in order. The first chunk that
/// fails (after any configured retries) aborts the document.
pub struct Extractor<P>
where
    P: CompletionProvider<Error = LlmError>,
{
    provider: P,
    chunker: TextChunker,
    config: ExtractorConfig,
}

/// Outcome of one chunk
struct ChunkOutcome {
    topics: TopicMap,
    usage: TokenUsage,
    retries: u32,
}

impl<P> Extractor<P>
where
    P: CompletionProvider<Error = LlmError>,
{
    /// Create a new Extractor
    ///
    /// # Errors
    ///
    /// `ExtractorError::Config` if the configuration does not validate.
    pub fn new(provider: P, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let chunker = TextChunker::new(config.chunk_size, config.overlap_size)?;

        Ok(Self {
            provider,
            chunker,
            config,
        })
    }

    /// Chunks the document would be sent as
    pub fn plan(&self, document: &Document) -> Vec<Chunk> {
        self.chunker.chunk(document.text())
    }

    /// Extract and merge topics for a whole document
    ///
    /// Usage of every completed call is recorded in `ledger`, including calls
    /// made before a failing chunk.
    pub fn extract_document(
        &self,
        document: &Document,
        ledger: &mut UsageLedger,
    ) -> Result<DocumentExtraction, ExtractorError> {
        let started = Instant::now();
        let chunks = self.plan(document);

        info!(
            "Chunking '{}': {} chars into {} chunk(s)",
            document.name(),
            document.char_len(),
            chunks.len()
        );

        let mut topics = TopicMap::new();
        let mut usage = TokenUsage::default();
        let mut empty_chunks = 0;
        let mut retries = 0;

        for chunk in &chunks {
            info!(
                "Processing chunk {}/{} for '{}'",
                chunk.index + 1,
                chunks.len(),
                document.name()
            );

            let outcome = self.extract_chunk(document.name(), chunk, ledger)?;
            usage += outcome.usage;
            retries += outcome.retries;

            if outcome.topics.is_empty() {
                warn!(
                    "No topics found in chunk {}/{} of '{}'",
                    chunk.index + 1,
                    chunks.len(),
                    document.name()
                );
                empty_chunks += 1;
                continue;
            }

            debug!(
                "Chunk {} yielded {} topic(s)",
                chunk.index + 1,
                outcome.topics.len()
            );
            topics.merge(outcome.topics);
        }

        let metadata = ExtractionMetadata {
            chunks_total: chunks.len(),
            empty_chunks,
            usage,
            retries,
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete for '{}': {} topic(s) from {} chunk(s)",
            document.name(),
            topics.len(),
            metadata.chunks_total
        );

        Ok(DocumentExtraction {
            source_name: document.name().to_string(),
            topics,
            metadata,
        })
    }

    /// Send one chunk, retrying service failures up to `chunk_retries` times
    fn extract_chunk(
        &self,
        document: &str,
        chunk: &Chunk,
        ledger: &mut UsageLedger,
    ) -> Result<ChunkOutcome, ExtractorError> {
        let mut attempt = 0;

        loop {
            match self.provider.complete(SEGMENTATION_PROMPT, &chunk.text) {
                Ok(completion) => {
                    ledger.record(completion.usage);
                    debug!(
                        "Parsing {} chars of model output for chunk {}",
                        completion.text.len(),
                        chunk.index + 1
                    );
                    return Ok(ChunkOutcome {
                        topics: parse_topics(&completion.text),
                        usage: completion.usage,
                        retries: attempt,
                    });
                }
                Err(e) => {
                    let error = ExtractorError::from_llm(document, chunk.index, e);
                    if !error.is_retryable() || attempt >= self.config.chunk_retries {
                        return Err(error);
                    }

                    attempt += 1;
                    let delay = self.config.retry_delay(attempt);
                    warn!(
                        "{} (retry {}/{} in {:?})",
                        error, attempt, self.config.chunk_retries, delay
                    );
                    thread::sleep(delay);
                }
            }
        }
    }
}
