// Content service - segment study material and generate per chunk
// Author: kelexine (https://github.com/kelexine)

use super::prompts::{chunk_prompt, MATERIAL_SYSTEM_PROMPT};
use crate::content::{ContentChunk, ContentSegmenter, ProcessedContent};
use crate::error::Result;
use crate::generation::{GenerationRequest, TextGenerator};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// What to produce from each chunk of material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContentTask {
    Summary,
    #[serde(rename_all = "camelCase")]
    Quiz {
        #[serde(default = "default_questions_per_chunk")]
        questions_per_chunk: u32,
    },
    Flashcards,
}

fn default_questions_per_chunk() -> u32 {
    5
}

impl ContentTask {
    /// Metric label for generation calls.
    pub fn label(&self) -> &'static str {
        match self {
            ContentTask::Summary => "summary",
            ContentTask::Quiz { .. } => "quiz",
            ContentTask::Flashcards => "flashcards",
        }
    }
}

/// Segmentation result without any generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentedDocument {
    pub content: ProcessedContent,
    pub chunks: Vec<ContentChunk>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkOutput {
    pub index: usize,
    pub topics: Vec<String>,
    pub token_count: usize,
    pub output: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocument {
    pub id: Uuid,
    pub task: ContentTask,
    pub section_count: usize,
    pub key_terms: Vec<String>,
    pub chunks: Vec<ChunkOutput>,
}

/// Runs raw material through the segmenter and sends every chunk to the
/// generator independently.
pub struct ContentService {
    segmenter: ContentSegmenter,
    generator: Arc<dyn TextGenerator>,
    max_concurrent_chunks: usize,
}

impl ContentService {
    pub fn new(
        segmenter: ContentSegmenter,
        generator: Arc<dyn TextGenerator>,
        max_concurrent_chunks: usize,
    ) -> Self {
        Self {
            segmenter,
            generator,
            max_concurrent_chunks: max_concurrent_chunks.max(1),
        }
    }

    pub fn segment(&self, text: &str) -> SegmentedDocument {
        let (content, chunks) = self.segmenter.segment(text);
        SegmentedDocument { content, chunks }
    }

    /// Generate `task` output for every chunk, in chunk order.
    ///
    /// At most `max_concurrent_chunks` calls are in flight; the first failure
    /// aborts the whole document.
    pub async fn process(&self, text: &str, task: ContentTask) -> Result<ProcessedDocument> {
        let SegmentedDocument { content, chunks } = self.segment(text);
        let id = Uuid::new_v4();

        info!(
            "Processing document {}: task={} sections={} chunks={}",
            id,
            task.label(),
            content.sections.len(),
            chunks.len()
        );

        let outputs: Vec<ChunkOutput> = stream::iter(chunks.into_iter().enumerate())
            .map(|(index, chunk)| {
                let task = &task;
                async move {
                    let request = GenerationRequest::new(task.label(), chunk_prompt(task, &chunk))
                        .with_system(MATERIAL_SYSTEM_PROMPT);
                    let output = self.generator.generate(request).await?;
                    Ok::<_, crate::error::AppError>(ChunkOutput {
                        index,
                        topics: chunk.topics,
                        token_count: chunk.token_count,
                        output,
                    })
                }
            })
            .buffered(self.max_concurrent_chunks)
            .try_collect()
            .await?;

        Ok(ProcessedDocument {
            id,
            task,
            section_count: content.sections.len(),
            key_terms: content.key_terms,
            chunks: outputs,
        })
    }
}
