// Explanation cache tests - public API only
// Author: kelexine (https://github.com/kelexine)

use std::sync::Arc;
use studyforge::cache::{CacheConfig, ExplanationCache, ExplanationKey, ManualClock};

const TTL_MS: i64 = 24 * 60 * 60 * 1000;

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();

    assert_eq!(config.capacity, 100);
    assert_eq!(config.ttl_seconds, 86_400);
    assert_eq!(config.sweep_interval_seconds, 0);
}

#[test]
fn test_cache_stats_initialization() {
    let clock = Arc::new(ManualClock::new(7_000));
    let cache = ExplanationCache::with_clock(&CacheConfig::default(), clock).unwrap();
    let stats = cache.stats();

    assert_eq!(stats.size, 0);
    assert_eq!(stats.oldest_entry, 7_000);
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
}

#[test]
fn test_inserting_101_keys_keeps_100() {
    let cache = ExplanationCache::new(&CacheConfig::default()).unwrap();

    for i in 0..101 {
        let id = format!("question-{}", i);
        cache.set(&ExplanationKey::new(&id, "answer"), "explanation");
    }

    assert_eq!(cache.stats().size, 100);
    assert!(cache.get(&ExplanationKey::new("question-0", "answer")).is_none());
    assert!(cache.get(&ExplanationKey::new("question-100", "answer")).is_some());
}

#[test]
fn test_ttl_with_mocked_clock() {
    let clock = Arc::new(ManualClock::new(0));
    let cache = ExplanationCache::with_clock(&CacheConfig::default(), clock.clone()).unwrap();
    let key = ExplanationKey::new("Q1", "A");

    cache.set(&key, "x");

    clock.set(TTL_MS - 1);
    assert_eq!(cache.get(&key).as_deref(), Some("x"));

    clock.set(TTL_MS + 1);
    assert_eq!(cache.get(&key), None);
    assert_eq!(cache.stats().size, 0);
}

#[test]
fn test_key_independence() {
    let cache = ExplanationCache::new(&CacheConfig::default()).unwrap();

    cache.set(&ExplanationKey::new("Q1", "A"), "x");

    assert_eq!(cache.get(&ExplanationKey::new("Q1", "B")), None);
}

#[test]
fn test_independent_instances() {
    let first = ExplanationCache::new(&CacheConfig::default()).unwrap();
    let second = ExplanationCache::new(&CacheConfig::default()).unwrap();

    first.set(&ExplanationKey::new("Q1", "A"), "x");

    assert!(second.get(&ExplanationKey::new("Q1", "A")).is_none());
}

#[test]
fn test_stats_serialize_camel_case() {
    let cache = ExplanationCache::new(&CacheConfig::default()).unwrap();
    let json = serde_json::to_value(cache.stats()).unwrap();

    assert!(json.get("oldestEntry").is_some());
    assert!(json.get("size").is_some());
}
