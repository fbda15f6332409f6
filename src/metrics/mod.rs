// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    CACHE_ENTRIES,
    CACHE_OPERATIONS,
    CHUNKS_PER_DOCUMENT,
    CHUNK_ANOMALIES,
    GENERATION_CALLS,
    GENERATION_DURATION,
    REQUESTS_TOTAL,
};

/// Helper to record request metrics
pub fn record_request(endpoint: &str, status_code: u16) {
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, &status_code.to_string()])
        .inc();
}

/// Helper to record text-generation call metrics
pub fn record_generation(task: &str, success: bool, duration_secs: f64) {
    let status = if success { "success" } else { "failure" };
    GENERATION_CALLS.with_label_values(&[task, status]).inc();
    GENERATION_DURATION
        .with_label_values(&[task])
        .observe(duration_secs);
}

/// Helpers to record explanation cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_expired() {
    CACHE_OPERATIONS.with_label_values(&["expired"]).inc();
}

pub fn record_cache_eviction() {
    CACHE_OPERATIONS.with_label_values(&["eviction"]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.set(count as f64);
}

/// Helpers to record chunking outcomes
pub fn record_chunks(count: usize) {
    CHUNKS_PER_DOCUMENT.observe(count as f64);
}

pub fn record_oversized_chunk() {
    CHUNK_ANOMALIES.with_label_values(&["oversized_chunk"]).inc();
}

pub fn record_key_terms_dropped() {
    CHUNK_ANOMALIES.with_label_values(&["key_terms_dropped"]).inc();
}
