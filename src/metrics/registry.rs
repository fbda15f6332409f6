// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_gauge_with_registry,
    register_histogram_vec_with_registry, register_histogram_with_registry, CounterVec, Encoder,
    Gauge, Histogram, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Total number of API requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of API requests"),
        &["endpoint", "status_code"],
        REGISTRY
    ).expect("requests_total registers once");

    // ============================================================================
    // GENERATION METRICS
    // ============================================================================

    /// Calls to the text-generation service
    pub static ref GENERATION_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("generation_calls_total", "Total text-generation calls"),
        &["task", "status"], // status: success, failure
        REGISTRY
    ).expect("generation_calls_total registers once");

    /// Text-generation call duration
    pub static ref GENERATION_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("generation_duration_seconds", "Text-generation call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["task"],
        REGISTRY
    ).expect("generation_duration_seconds registers once");

    // ============================================================================
    // EXPLANATION CACHE METRICS
    // ============================================================================

    /// Explanation cache operations
    pub static ref CACHE_OPERATIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("explanation_cache_operations_total", "Total explanation cache operations"),
        &["operation"], // operation: hit, miss, expired, eviction
        REGISTRY
    ).expect("explanation_cache_operations_total registers once");

    /// Current explanation cache entries
    pub static ref CACHE_ENTRIES: Gauge = register_gauge_with_registry!(
        Opts::new("explanation_cache_entries", "Current number of cached explanations"),
        REGISTRY
    ).expect("explanation_cache_entries registers once");

    // ============================================================================
    // CONTENT METRICS
    // ============================================================================

    /// Chunks produced per segmentation run
    pub static ref CHUNKS_PER_DOCUMENT: Histogram = register_histogram_with_registry!(
        prometheus::HistogramOpts::new("content_chunks_per_document", "Chunks produced per document")
            .buckets(vec![0.0, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0]),
        REGISTRY
    ).expect("content_chunks_per_document registers once");

    /// Budget anomalies during chunking
    pub static ref CHUNK_ANOMALIES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("content_chunk_anomalies_total", "Chunks over budget and dropped key-term blocks"),
        &["kind"], // kind: oversized_chunk, key_terms_dropped
        REGISTRY
    ).expect("content_chunk_anomalies_total registers once");
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
