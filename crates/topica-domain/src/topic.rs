//! Ordered topic maps and the merge policy between chunks
//!
//! A [`TopicMap`] keeps topics in first-seen order. Inserting a header that
//! is already present appends to its content instead of replacing it, which
//! is what lets a document's per-chunk maps be folded into one.
//!
//! # Known limitation
//!
//! Keys are compared with exact string equality. Headers whose wording drifts
//! between chunks (`Topic_Dosage` vs `Topic_Dosage:`) stay separate entries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from topic header to accumulated content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicMap {
    entries: IndexMap<String, String>,
}

impl TopicMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `content` to `header`, creating the entry if it is new
    pub fn append(&mut self, header: impl Into<String>, content: &str) {
        self.entries
            .entry(header.into())
            .or_default()
            .push_str(content);
    }

    /// Open an entry for `header` without adding content
    ///
    /// Existing content is left untouched.
    pub fn open(&mut self, header: impl Into<String>) {
        self.entries.entry(header.into()).or_default();
    }

    /// Fold `other` into `self`
    ///
    /// Shared headers get `other`'s content appended; new headers are added
    /// after the existing ones in `other`'s order.
    pub fn merge(&mut self, other: TopicMap) {
        for (header, content) in other.entries {
            self.append(header, &content);
        }
    }

    /// Content stored for `header`
    pub fn get(&self, header: &str) -> Option<&str> {
        self.entries.get(header).map(String::as_str)
    }

    /// First header in insertion order
    pub fn first_header(&self) -> Option<&str> {
        self.entries.keys().next().map(String::as_str)
    }

    /// Headers in insertion order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(header, content)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, c)| (h.as_str(), c.as_str()))
    }

    /// Number of topics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no topic has been seen
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render one topic as `"{header}\n\n{content}\n"`
    pub fn render_segment(header: &str, content: &str) -> String {
        format!("{}\n\n{}\n", header, content)
    }

    /// Render every topic, in order, as one string
    pub fn render(&self) -> String {
        self.iter()
            .map(|(header, content)| Self::render_segment(header, content))
            .collect()
    }

    /// Character length of [`render`](Self::render)
    pub fn rendered_len(&self) -> usize {
        self.iter()
            .map(|(header, content)| header.chars().count() + content.chars().count() + 3)
            .sum()
    }
}

impl FromIterator<(String, String)> for TopicMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = TopicMap::new();
        for (header, content) in iter {
            map.append(header, &content);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> TopicMap {
        pairs
            .iter()
            .map(|(h, c)| (h.to_string(), c.to_string()))
            .collect()
    }

    #[test]
    fn test_append_existing_header_concatenates() {
        let mut topics = TopicMap::new();
        topics.append("Topic_A", "one\n");
        topics.append("Topic_B", "two\n");
        topics.append("Topic_A", "three\n");

        assert_eq!(topics.len(), 2);
        assert_eq!(topics.get("Topic_A"), Some("one\nthree\n"));
        assert_eq!(topics.headers().collect::<Vec<_>>(), vec!["Topic_A", "Topic_B"]);
    }

    #[test]
    fn test_open_keeps_existing_content() {
        let mut topics = TopicMap::new();
        topics.append("Topic_A", "kept\n");
        topics.open("Topic_A");
        topics.open("Topic_B");

        assert_eq!(topics.get("Topic_A"), Some("kept\n"));
        assert_eq!(topics.get("Topic_B"), Some(""));
    }

    #[test]
    fn test_merge_preserves_chunk_order() {
        let c1 = map(&[("Topic_Shared", "first\n"), ("Topic_One", "1\n")]);
        let c2 = map(&[("Topic_Two", "2\n")]);
        let c3 = map(&[("Topic_Shared", "third\n")]);

        let mut merged = TopicMap::new();
        for map in [c1, c2, c3] {
            merged.merge(map);
        }

        assert_eq!(merged.get("Topic_Shared"), Some("first\nthird\n"));
        assert_eq!(
            merged.headers().collect::<Vec<_>>(),
            vec!["Topic_Shared", "Topic_One", "Topic_Two"]
        );
    }

    #[test]
    fn test_merge_keeps_near_identical_headers_apart() {
        let mut merged = map(&[("Topic_Dosage", "a\n")]);
        merged.merge(map(&[("Topic_Dosage:", "b\n")]));

        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_render_and_rendered_len_agree() {
        let topics = map(&[("Topic_A", "foo\nfoo\n"), ("Topic_B", "bär\n")]);
        let rendered = topics.render();

        assert_eq!(rendered, "Topic_A\n\nfoo\nfoo\n\nTopic_B\n\nbär\n\n");
        assert_eq!(topics.rendered_len(), rendered.chars().count());
    }

    #[test]
    fn test_first_header() {
        assert_eq!(TopicMap::new().first_header(), None);
        let topics = map(&[("Topic_Z", ""), ("Topic_A", "")]);
        assert_eq!(topics.first_header(), Some("Topic_Z"));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let topics = map(&[("Topic_B", "b\n"), ("Topic_A", "a\n")]);
        let json = serde_json::to_string(&topics).unwrap();
        assert_eq!(json, r#"{"Topic_B":"b\n","Topic_A":"a\n"}"#);
    }
}
