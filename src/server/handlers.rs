// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::cache::CacheStats;
use crate::error::{AppError, Result};
use crate::metrics::gather_metrics;
use crate::services::{
    ContentTask, Explanation, ExplanationRequest, ProcessedDocument, SegmentedDocument,
};
use axum::{extract::State, http::header, http::StatusCode, response::IntoResponse, Json};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub text: String,
    pub task: ContentTask,
}

/// Parse a raw JSON body, reporting failures as invalid requests
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        debug!(
            "Rejected request body (first 200 chars): {}",
            body.chars().take(200).collect::<String>()
        );
        AppError::InvalidRequest(format!("JSON deserialization error: {}", e))
    })
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Generation credentials
    let generation_check = if state.config.generation.api_key.is_some() {
        HealthCheck {
            status: "ok".to_string(),
            message: state.explanations.generator_description(),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: "No generation API key configured".to_string(),
        }
    };
    checks.insert("generation".to_string(), generation_check);

    // Explanation cache
    let stats = state.explanations.cache_stats();
    checks.insert(
        "explanation_cache".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("{} of {} entries in use", stats.size, state.cache.capacity()),
        },
    );

    // Segmenter configuration
    checks.insert(
        "segmenter".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Chunk budget {} tokens", state.config.segmenter.max_chunk_tokens),
        },
    );

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}

/// Handler for POST /v1/explanations
pub async fn explain_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<Explanation>> {
    let request: ExplanationRequest = parse_body(&body)?;
    debug!(
        "Explanation request: question={} answer_chars={}",
        request.question_id,
        request.user_answer.len()
    );

    let explanation = state.explanations.explain(&request).await?;
    Ok(Json(explanation))
}

pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.explanations.cache_stats())
}

pub async fn clear_cache_handler(State(state): State<AppState>) -> StatusCode {
    state.explanations.clear_cache();
    info!("Explanation cache cleared via API");
    StatusCode::NO_CONTENT
}

/// Handler for POST /v1/content/segment (no generation)
pub async fn segment_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<SegmentedDocument>> {
    let request: SegmentRequest = parse_body(&body)?;
    Ok(Json(state.content.segment(&request.text)))
}

/// Handler for POST /v1/content/process
pub async fn process_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ProcessedDocument>> {
    let request: ProcessRequest = parse_body(&body)?;
    info!(
        "Content processing request: task={} chars={}",
        request.task.label(),
        request.text.len()
    );

    let document = state.content.process(&request.text, request.task).await?;
    Ok(Json(document))
}
