// Content segmenter - sections, key terms and token-bounded chunks
// Author: kelexine (https://github.com/kelexine)

use super::cleaner::clean_content;
use super::models::{ContentChunk, ProcessedContent, Section, SegmenterConfig, KEY_TERMS_TOPIC};
use super::patterns::{HEADING, KEY_TERM};
use super::tokens::estimate_token_count;
use crate::metrics;
use tracing::{debug, warn};

/// Turns raw study material into cleaned sections and then into chunks that
/// fit a generation model's context budget.
#[derive(Debug, Clone, Default)]
pub struct ContentSegmenter {
    config: SegmenterConfig,
}

impl ContentSegmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Split raw text into cleaned sections and collect key-term sentences.
    ///
    /// Text before the first heading becomes a section titled with the
    /// configured preamble title. Text following a colon heading on the same
    /// line is part of that section. Sections that clean down to nothing are
    /// dropped along with their titles.
    pub fn extract(&self, raw_text: &str) -> ProcessedContent {
        let mut raw_sections: Vec<(String, &str)> = Vec::new();
        let mut body_start = 0;
        let mut current_title = self.config.preamble_title.clone();

        for caps in HEADING.captures_iter(raw_text) {
            let (Some(whole), Some(title)) = (caps.get(0), caps.get(1).or_else(|| caps.get(2)))
            else {
                continue;
            };
            raw_sections.push((current_title, &raw_text[body_start..whole.start()]));
            current_title = title.as_str().trim().to_string();
            body_start = whole.end();
        }
        raw_sections.push((current_title, &raw_text[body_start..]));

        let sections: Vec<Section> = raw_sections
            .into_iter()
            .filter_map(|(title, body)| {
                let content = clean_content(body);
                if content.is_empty() {
                    None
                } else {
                    Some(Section::new(title, content))
                }
            })
            .collect();

        let key_terms: Vec<String> = KEY_TERM
            .find_iter(raw_text)
            .map(|m| m.as_str().to_string())
            .collect();

        let processed = ProcessedContent::new(sections, key_terms);
        debug!(
            "Extracted {} sections and {} key terms ({} chars)",
            processed.sections.len(),
            processed.key_terms.len(),
            processed.total_length
        );
        processed
    }

    /// Pack sections, in order, into chunks within the token budget.
    ///
    /// A section is never split: one that alone exceeds the budget becomes an
    /// oversized chunk of its own. Key terms follow as a final chunk when the
    /// whole block fits, and are dropped otherwise.
    pub fn chunk(&self, content: &ProcessedContent) -> Vec<ContentChunk> {
        let max_tokens = self.config.max_chunk_tokens;
        let mut chunks = Vec::new();
        let mut buffer = ChunkBuffer::default();

        for section in &content.sections {
            let text = section.render();
            let tokens = estimate_token_count(&text);

            if buffer.token_count + tokens > max_tokens && !buffer.is_empty() {
                chunks.push(buffer.flush());
            }

            buffer.push(&section.title, &text, tokens);
        }

        if !buffer.is_empty() {
            chunks.push(buffer.flush());
        }

        for chunk in chunks.iter().filter(|c| c.token_count > max_tokens) {
            metrics::record_oversized_chunk();
            warn!(
                "Chunk for {:?} is {} tokens, over the {} token budget",
                chunk.topics, chunk.token_count, max_tokens
            );
        }

        if let Some(block) = key_terms_block(&content.key_terms) {
            let tokens = estimate_token_count(&block);
            if tokens <= max_tokens {
                chunks.push(ContentChunk {
                    content: block,
                    topics: vec![KEY_TERMS_TOPIC.to_string()],
                    token_count: tokens,
                });
            } else {
                metrics::record_key_terms_dropped();
                warn!(
                    "Dropping key terms block: {} tokens exceeds the {} token budget",
                    tokens, max_tokens
                );
            }
        }

        metrics::record_chunks(chunks.len());
        debug!("Produced {} chunks from {} sections", chunks.len(), content.sections.len());
        chunks
    }

    /// Extract then chunk in one step
    pub fn segment(&self, raw_text: &str) -> (ProcessedContent, Vec<ContentChunk>) {
        let processed = self.extract(raw_text);
        let chunks = self.chunk(&processed);
        (processed, chunks)
    }
}

/// `Key Terms:` followed by one term per line, in extraction order.
fn key_terms_block(terms: &[String]) -> Option<String> {
    if terms.is_empty() {
        return None;
    }

    Some(format!("{}:\n{}", KEY_TERMS_TOPIC, terms.join("\n")))
}

#[derive(Default)]
struct ChunkBuffer {
    text: String,
    topics: Vec<String>,
    token_count: usize,
}

impl ChunkBuffer {
    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn push(&mut self, title: &str, text: &str, tokens: usize) {
        self.text.push_str(text);
        if !self.topics.iter().any(|t| t == title) {
            self.topics.push(title.to_string());
        }
        self.token_count += tokens;
    }

    fn flush(&mut self) -> ContentChunk {
        let buffer = std::mem::take(self);
        ContentChunk {
            content: buffer.text.trim_end().to_string(),
            topics: buffer.topics,
            token_count: buffer.token_count,
        }
    }
}
