//! Parse raw model output into a topic map
//!
//! The parser is a two-state line machine:
//!
//! ```text
//! NoTopic --header--> InTopic(h) --header--> InTopic(h') ...
//!    |                    |
//!  other: drop          other: append "{line}\n" to h
//! ```
//!
//! It never fails. Output without a single header yields an empty map.

use crate::prompt::is_topic_header;
use topica_domain::TopicMap;
use tracing::debug;

/// Parser state while scanning lines
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseState {
    /// No header seen yet
    NoTopic,
    /// Lines belong to this header
    InTopic(String),
}

/// Parse raw model output into topics
///
/// Lines are trimmed. A line starting with the topic marker opens (or
/// reopens) the entry keyed by the whole trimmed line. Every other line is
/// appended, followed by `\n`, to the open topic. A header repeated within
/// the same output keeps accumulating into the same entry.
pub fn parse_topics(raw: &str) -> TopicMap {
    let mut topics = TopicMap::new();
    let mut state = ParseState::NoTopic;
    let mut discarded = 0usize;

    for line in raw.lines() {
        let line = line.trim();

        if is_topic_header(line) {
            topics.open(line);
            state = ParseState::InTopic(line.to_string());
            continue;
        }

        match &state {
            ParseState::NoTopic => discarded += 1,
            ParseState::InTopic(header) => {
                let mut content = String::with_capacity(line.len() + 1);
                content.push_str(line);
                content.push('\n');
                topics.append(header.as_str(), &content);
            }
        }
    }

    if discarded > 0 {
        debug!("Discarded {} line(s) before the first topic header", discarded);
    }

    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_topics() {
        let topics = parse_topics("Topic_A\nfoo\nTopic_B\nbar");

        assert_eq!(topics.len(), 2);
        assert_eq!(topics.get("Topic_A"), Some("foo\n"));
        assert_eq!(topics.get("Topic_B"), Some("bar\n"));
        assert_eq!(topics.first_header(), Some("Topic_A"));
    }

    #[test]
    fn test_preamble_is_discarded() {
        let topics = parse_topics("Sure! Here are the topics:\n\nTopic_Scope\nApplies to all.");

        assert_eq!(topics.headers().collect::<Vec<_>>(), vec!["Topic_Scope"]);
        assert_eq!(topics.get("Topic_Scope"), Some("Applies to all.\n"));
    }

    #[test]
    fn test_no_headers_yields_empty_map() {
        assert!(parse_topics("I could not find any topics.").is_empty());
        assert!(parse_topics("").is_empty());
    }

    #[test]
    fn test_header_key_is_full_trimmed_line() {
        let topics = parse_topics("   Topic_Side Effects: Common  \n  nausea  ");

        assert_eq!(topics.get("Topic_Side Effects: Common"), Some("nausea\n"));
    }

    #[test]
    fn test_repeated_header_appends() {
        let raw = "Topic_A\none\nTopic_B\ntwo\nTopic_A\nthree";
        let topics = parse_topics(raw);

        assert_eq!(topics.len(), 2);
        assert_eq!(topics.get("Topic_A"), Some("one\nthree\n"));
        assert_eq!(topics.headers().collect::<Vec<_>>(), vec!["Topic_A", "Topic_B"]);
    }

    #[test]
    fn test_blank_lines_inside_topic_are_kept() {
        let topics = parse_topics("Topic_A\nfirst\n\nsecond\n");
        assert_eq!(topics.get("Topic_A"), Some("first\n\nsecond\n"));
    }

    #[test]
    fn test_header_without_content() {
        let topics = parse_topics("Topic_Empty\nTopic_Full\ntext");
        assert_eq!(topics.get("Topic_Empty"), Some(""));
        assert_eq!(topics.get("Topic_Full"), Some("text\n"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let topics = parse_topics("Topic_A\r\nfoo\r\nbar\r\n");
        assert_eq!(topics.get("Topic_A"), Some("foo\nbar\n"));
    }

    #[test]
    fn test_render_then_parse_round_trip() {
        let original = parse_topics("Topic_A\nalpha line\nmore alpha\nTopic_B: x/y\nbeta");
        let reparsed = parse_topics(&original.render());

        assert_eq!(
            original.headers().collect::<Vec<_>>(),
            reparsed.headers().collect::<Vec<_>>()
        );
        for (header, content) in original.iter() {
            assert_eq!(reparsed.get(header).map(str::trim), Some(content.trim()));
        }
    }
}
