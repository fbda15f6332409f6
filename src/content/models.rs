//! Data structures produced by the content segmenter.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// Topic label attached to the synthetic key-terms chunk.
pub const KEY_TERMS_TOPIC: &str = "Key Terms";

/// Settings for sectioning and chunking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Token budget for a single chunk.
    /// Default: `1500`
    #[serde(default = "default_max_chunk_tokens")]
    pub max_chunk_tokens: usize,

    /// Title given to text that appears before the first heading.
    /// Default: `Introduction`
    #[serde(default = "default_preamble_title")]
    pub preamble_title: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: default_max_chunk_tokens(),
            preamble_title: default_preamble_title(),
        }
    }
}

fn default_max_chunk_tokens() -> usize {
    1500
}

fn default_preamble_title() -> String {
    "Introduction".to_string()
}

/// A titled span of cleaned document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// The text this section contributes to a chunk.
    ///
    /// Adds a fixed six characters of formatting around title and content.
    pub fn render(&self) -> String {
        format!("## {}\n{}\n\n", self.title, self.content)
    }

    /// Characters counted toward `total_length`.
    pub fn char_len(&self) -> usize {
        self.title.chars().count() + self.content.chars().count()
    }
}

/// Cleaned, sectioned representation of a raw document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedContent {
    /// Sections in document order; none has empty content.
    pub sections: Vec<Section>,
    /// Key-term sentences in order of appearance.
    pub key_terms: Vec<String>,
    /// Sum of title and content lengths over `sections`.
    pub total_length: usize,
}

impl ProcessedContent {
    /// Build from sections, computing `total_length`.
    pub fn new(sections: Vec<Section>, key_terms: Vec<String>) -> Self {
        let total_length = sections.iter().map(Section::char_len).sum();
        Self {
            sections,
            key_terms,
            total_length,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.key_terms.is_empty()
    }
}

/// A unit of text sized for one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentChunk {
    pub content: String,
    /// Titles of contributing sections, de-duplicated, first occurrence first.
    pub topics: Vec<String>,
    pub token_count: usize,
}
