//! The fixed segmentation instruction sent with every chunk

/// Prefix every topic header must start with
pub const TOPIC_MARKER: &str = "Topic_";

/// System instruction asking the model to segment a chunk into topics
///
/// The chunk itself goes in the user message, unmodified.
pub const SEGMENTATION_PROMPT: &str = r#"# Objective
You split a document into its distinct topics and copy out the text that belongs to each one.

Identify every distinct topic in the document. For each topic, reproduce all of the related text exactly as written. Do not summarize, paraphrase, shorten, or reorder the text. Place every piece of text under the header of the topic it belongs to.

# Output Format
Topic_[Name of the first topic]
[All text belonging to this topic, verbatim, including subtopics and examples]

Topic_[Name of the next topic]
[All text belonging to this topic, verbatim]

# Rules
1. Nothing from the document may be summarized or left out.
2. Topics must be distinct and clearly separated.
3. Subtopics and examples stay under their main topic.
4. Text is copied verbatim, keeping the original wording, structure, and details.
5. Every topic header line starts with "Topic_".

Output only the topics and their text. No code, explanations, or commentary."#;

/// Whether a trimmed line is a topic header
pub fn is_topic_header(line: &str) -> bool {
    line.starts_with(TOPIC_MARKER)
}
