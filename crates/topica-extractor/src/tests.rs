//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{chunk_text, Extractor, ExtractorConfig, ExtractorError};
    use topica_domain::{Document, UsageLedger};
    use topica_llm::{MockProvider, MockReply};

    fn quick_config() -> ExtractorConfig {
        ExtractorConfig {
            retry_backoff_ms: 0,
            ..ExtractorConfig::default()
        }
    }

    #[test]
    fn test_full_extraction_flow() {
        let llm = MockProvider::new("Topic_A\nfoo\nTopic_B\nbar").with_usage(600, 20);
        let extractor = Extractor::new(llm.clone(), quick_config()).unwrap();

        let text: String = (0..3500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let doc = Document::new("statute", text.clone());
        let mut ledger = UsageLedger::new();

        let result = extractor.extract_document(&doc, &mut ledger).unwrap();

        let chunks = extractor.plan(&doc);
        assert_eq!(
            chunks.iter().map(|c| (c.start, c.end)).collect::<Vec<_>>(),
            vec![(0, 2000), (1800, 3500)]
        );
        assert_eq!(llm.requests()[1], text[1800..].to_string());

        assert_eq!(result.source_name, "statute");
        assert_eq!(result.topics.headers().collect::<Vec<_>>(), vec!["Topic_A", "Topic_B"]);
        assert_eq!(result.topics.get("Topic_A"), Some("foo\nfoo\n"));
        assert_eq!(result.topics.get("Topic_B"), Some("bar\nbar\n"));
        assert!(result.topics.rendered_len() < 1800);

        assert_eq!(result.metadata.chunks_total, 2);
        assert_eq!(result.metadata.empty_chunks, 0);
        assert_eq!(result.metadata.usage.prompt_tokens, 1200);
        assert_eq!(ledger.calls, 2);
        assert_eq!(ledger.total_tokens(), 1240);
    }

    #[test]
    fn test_merge_order_across_chunks() {
        let text = "0123456789abcdef";
        let chunks = chunk_text(text, 6, 0).unwrap();
        assert_eq!(chunks.len(), 3);

        let mut llm = MockProvider::default();
        llm.add_response(chunks[0].text.clone(), "Topic_Shared\nfrom c1\nTopic_First\nx");
        llm.add_response(chunks[1].text.clone(), "Topic_Middle\ny");
        llm.add_response(chunks[2].text.clone(), "Topic_Shared\nfrom c3");

        let config = ExtractorConfig {
            chunk_size: 6,
            overlap_size: 0,
            ..quick_config()
        };
        let extractor = Extractor::new(llm, config).unwrap();

        let result = extractor
            .extract_document(&Document::new("d", text), &mut UsageLedger::new())
            .unwrap();

        assert_eq!(result.topics.get("Topic_Shared"), Some("from c1\nfrom c3\n"));
        assert_eq!(
            result.topics.headers().collect::<Vec<_>>(),
            vec!["Topic_Shared", "Topic_First", "Topic_Middle"]
        );
    }

    #[test]
    fn test_chunk_without_topics_contributes_nothing() {
        let llm = MockProvider::new("Topic_A\nfoo");
        llm.enqueue(MockReply::Text("Nothing to extract.".to_string()));

        let config = ExtractorConfig {
            chunk_size: 10,
            overlap_size: 2,
            ..quick_config()
        };
        let extractor = Extractor::new(llm, config).unwrap();

        let result = extractor
            .extract_document(&Document::new("d", "x".repeat(15)), &mut UsageLedger::new())
            .unwrap();

        assert_eq!(result.metadata.empty_chunks, 1);
        assert_eq!(result.topics.get("Topic_A"), Some("foo\n"));
    }

    #[test]
    fn test_failure_reports_document_and_chunk() {
        let llm = MockProvider::new("Topic_A\nfoo");
        llm.enqueue(MockReply::ServiceFailure(429));

        let extractor = Extractor::new(llm, quick_config()).unwrap();
        let err = extractor
            .extract_document(&Document::new("regulation-7", "text"), &mut UsageLedger::new())
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("regulation-7"));
        assert!(message.contains("429"));
        assert!(matches!(err, ExtractorError::Service { chunk: 0, .. }));
    }

    #[test]
    fn test_config_presets_build_extractors() {
        for config in [
            ExtractorConfig::default(),
            ExtractorConfig::small_context(),
            ExtractorConfig::large_context(),
        ] {
            assert!(Extractor::new(MockProvider::default(), config).is_ok());
        }
    }
}
