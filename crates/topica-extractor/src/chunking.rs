//! Overlapping fixed-size text windows

use crate::error::ExtractorError;
use std::iter;
use topica_domain::Chunk;

/// Splits text into windows of `chunk_size` characters where each window
/// repeats the last `overlap_size` characters of the one before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    chunk_size: usize,
    overlap_size: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// Fails when `overlap_size >= chunk_size`: the window would never advance.
    pub fn new(chunk_size: usize, overlap_size: usize) -> Result<Self, ExtractorError> {
        if overlap_size >= chunk_size {
            return Err(ExtractorError::Config(format!(
                "overlap_size ({}) must be smaller than chunk_size ({})",
                overlap_size, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            overlap_size,
        })
    }

    /// Chunk the given text
    ///
    /// Empty text yields no chunks. The last chunk always ends at the end of
    /// the text and may be shorter than `chunk_size`.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        // Byte offset of every character boundary, including the end.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(text.len()))
            .collect();
        let len = boundaries.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < len {
            let end = (start + self.chunk_size).min(len);
            chunks.push(Chunk {
                index: chunks.len(),
                start,
                end,
                text: text[boundaries[start]..boundaries[end]].to_string(),
            });

            if end >= len {
                break;
            }
            start = end - self.overlap_size;
        }

        chunks
    }
}

/// Chunk `text` in one call
pub fn chunk_text(
    text: &str,
    chunk_size: usize,
    overlap_size: usize,
) -> Result<Vec<Chunk>, ExtractorError> {
    Ok(TextChunker::new(chunk_size, overlap_size)?.chunk(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spans(chunks: &[Chunk]) -> Vec<(usize, usize)> {
        chunks.iter().map(|c| (c.start, c.end)).collect()
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunks = chunk_text("", 100, 10).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = chunk_text("Short text here.", 100, 10).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Short text here.");
        assert_eq!((chunks[0].start, chunks[0].end), (0, 16));
    }

    #[test]
    fn test_text_of_exactly_chunk_size_is_single_chunk() {
        let text = "a".repeat(100);
        let chunks = chunk_text(&text, 100, 10).unwrap();
        assert_eq!(spans(&chunks), vec![(0, 100)]);
    }

    #[test]
    fn test_default_sizes_on_3500_chars() {
        let text = "x".repeat(3500);
        let chunks = chunk_text(&text, 2000, 200).unwrap();
        assert_eq!(spans(&chunks), vec![(0, 2000), (1800, 3500)]);
        assert_eq!(chunks[1].text.len(), 1700);
    }

    #[test]
    fn test_windows_advance_by_chunk_minus_overlap() {
        let text: String = ('a'..='z').collect();
        let chunks = chunk_text(&text, 10, 3).unwrap();

        assert_eq!(spans(&chunks), vec![(0, 10), (7, 17), (14, 24), (21, 26)]);
        assert_eq!(chunks[1].text, "hijklmnopq");
        assert_eq!(chunks[3].text, "vwxyz");
        assert_eq!(
            chunks.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_zero_overlap_partitions_text() {
        let chunks = chunk_text("abcdefg", 3, 0).unwrap();
        let texts: Vec<_> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_multibyte_text_is_cut_on_characters() {
        let text = "äöüßéèêëç";
        let chunks = chunk_text(text, 4, 1).unwrap();

        assert_eq!(chunks[0].text, "äöüß");
        assert_eq!(chunks[1].text, "ßéèê");
        assert_eq!(chunks.last().unwrap().end, 9);
    }

    #[test]
    fn test_overlap_equal_to_chunk_size_is_rejected() {
        let result = chunk_text("anything", 10, 10);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_overlap_larger_than_chunk_size_is_rejected() {
        assert!(matches!(
            TextChunker::new(10, 50),
            Err(ExtractorError::Config(_))
        ));
    }

    #[test]
    fn test_zero_chunk_size_is_rejected() {
        assert!(TextChunker::new(0, 0).is_err());
    }

    proptest! {
        #[test]
        fn prop_chunks_reconstruct_text(
            text in "\\PC{0,400}",
            chunk_size in 1usize..80,
            overlap_seed in 0usize..80,
        ) {
            let overlap_size = overlap_seed % chunk_size;
            let chunks = chunk_text(&text, chunk_size, overlap_size).unwrap();
            let len = text.chars().count();

            if len == 0 {
                prop_assert!(chunks.is_empty());
                return Ok(());
            }

            let mut rebuilt = String::new();
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert!(!chunk.is_empty());
                prop_assert!(chunk.len() <= chunk_size);
                prop_assert_eq!(chunk.text.chars().count(), chunk.len());

                if i == 0 {
                    prop_assert_eq!(chunk.start, 0);
                    rebuilt.push_str(&chunk.text);
                } else {
                    let prev = &chunks[i - 1];
                    prop_assert!(chunk.start > prev.start);
                    prop_assert_eq!(prev.len(), chunk_size);
                    prop_assert_eq!(chunk.start, prev.end - overlap_size);
                    rebuilt.extend(chunk.text.chars().skip(overlap_size));
                }
            }

            prop_assert_eq!(chunks.last().unwrap().end, len);
            prop_assert_eq!(rebuilt, text);
        }
    }
}
