//! Content processing pipeline for study material.
//!
//! Raw text goes through [`ContentSegmenter::extract`], which finds headings,
//! cleans each section body and collects key-term sentences, and then through
//! [`ContentSegmenter::chunk`], which packs sections into chunks that fit the
//! generation model's token budget.
//!
//! # Submodules
//!
//! - `cleaner`: footnote, citation, URL and whitespace scrubbing.
//! - `patterns`: the compiled heading, key-term and noise patterns.
//! - `segmenter`: sectioning and chunking.
//! - `tokens`: the 4:1 character-to-token estimate.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod cleaner;
pub mod models;
mod patterns;
pub mod segmenter;
pub mod tokens;

pub use cleaner::clean_content;
pub use models::{ContentChunk, ProcessedContent, Section, SegmenterConfig, KEY_TERMS_TOPIC};
pub use segmenter::ContentSegmenter;
pub use tokens::estimate_token_count;
