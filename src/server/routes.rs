// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    cache_stats_handler, clear_cache_handler, explain_handler, health_handler, metrics_handler,
    process_handler, segment_handler,
};
use super::middleware::{request_id_layers, track_requests};
use crate::cache::ExplanationCache;
use crate::config::AppConfig;
use crate::content::ContentSegmenter;
use crate::error::Result;
use crate::generation::TextGenerator;
use crate::services::{ContentService, ExplanationService};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub cache: Arc<ExplanationCache>,
    pub explanations: Arc<ExplanationService>,
    pub content: Arc<ContentService>,
}

impl AppState {
    /// Wire the cache, segmenter and services around one generator
    pub fn new(config: AppConfig, generator: Arc<dyn TextGenerator>) -> Result<Self> {
        let cache = Arc::new(ExplanationCache::new(&config.cache)?);
        let explanations = Arc::new(ExplanationService::new(cache.clone(), generator.clone()));
        let content = Arc::new(ContentService::new(
            ContentSegmenter::new(config.segmenter.clone()),
            generator,
            config.generation.max_concurrent_chunks,
        ));

        Ok(Self {
            config,
            cache,
            explanations,
            content,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    let (set_request_id, propagate_request_id) = request_id_layers();
    let max_body_bytes = state.config.server.max_body_bytes;

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/v1/explanations", post(explain_handler))
        .route(
            "/v1/explanations/cache",
            get(cache_stats_handler).delete(clear_cache_handler),
        )
        .route("/v1/content/segment", post(segment_handler))
        .route("/v1/content/process", post(process_handler))
        .route_layer(middleware::from_fn(track_requests))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
