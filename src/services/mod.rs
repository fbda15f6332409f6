// Service layer: explanation caching and study-material processing
// Author: kelexine (https://github.com/kelexine)

pub mod explanation;
pub mod processing;
mod prompts;

pub use explanation::{Explanation, ExplanationRequest, ExplanationService};
pub use processing::{
    ChunkOutput, ContentService, ContentTask, ProcessedDocument, SegmentedDocument,
};
