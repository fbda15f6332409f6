// Explanation service - cache-aside wrapper around the generator
// Author: kelexine (https://github.com/kelexine)

use super::prompts::{explanation_prompt, TUTOR_SYSTEM_PROMPT};
use crate::cache::{CacheStats, ExplanationCache, ExplanationKey};
use crate::error::{AppError, Result};
use crate::generation::{GenerationRequest, TextGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// A student's answer that needs explaining.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRequest {
    pub question_id: String,
    pub question: String,
    pub user_answer: String,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub question_id: String,
    pub explanation: String,
    /// Whether the text came from the cache instead of a fresh generation.
    pub cached: bool,
}

/// Serves explanations, consulting the cache before calling the generator
/// and populating it only after a successful response.
pub struct ExplanationService {
    cache: Arc<ExplanationCache>,
    generator: Arc<dyn TextGenerator>,
}

impl ExplanationService {
    pub fn new(cache: Arc<ExplanationCache>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { cache, generator }
    }

    pub async fn explain(&self, request: &ExplanationRequest) -> Result<Explanation> {
        if request.question_id.trim().is_empty() {
            return Err(AppError::InvalidRequest("questionId must not be empty".to_string()));
        }
        if request.question.trim().is_empty() {
            return Err(AppError::InvalidRequest("question must not be empty".to_string()));
        }

        let key = ExplanationKey::new(&request.question_id, &request.user_answer);
        if let Some(explanation) = self.cache.get(&key) {
            debug!("Serving cached explanation for question {}", request.question_id);
            return Ok(Explanation {
                question_id: request.question_id.clone(),
                explanation,
                cached: true,
            });
        }

        let generation = GenerationRequest::new("explanation", explanation_prompt(request))
            .with_system(TUTOR_SYSTEM_PROMPT);
        let explanation = self.generator.generate(generation).await?.trim().to_string();

        self.cache.set(&key, explanation.clone());
        info!("Generated explanation for question {}", request.question_id);

        Ok(Explanation {
            question_id: request.question_id.clone(),
            explanation,
            cached: false,
        })
    }

    /// Forget every cached explanation, e.g. when a new quiz session starts.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn generator_description(&self) -> String {
        self.generator.describe()
    }
}
