// Explanation cache - bounded, time-expiring memo of generated explanations
// Author: kelexine (https://github.com/kelexine)

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::models::{CacheConfig, CacheStats, ExplanationKey};
use crate::error::{AppError, Result};
use crate::metrics;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    explanation: String,
    inserted_at: i64,
}

struct Inner {
    // Only `peek`/`peek_mut` are used for reads, so recency order stays
    // equal to insertion order and `pop_lru` removes the earliest insert.
    entries: LruCache<String, CacheEntry>,
    stats: CacheStats,
}

/// Capacity-limited, TTL-expiring cache of explanations keyed by
/// `(question_id, answer)`.
///
/// Expiry is lazy: a stale entry is only removed when it is read, when
/// capacity pressure evicts it, or when [`purge_expired`](Self::purge_expired)
/// runs.
pub struct ExplanationCache {
    inner: Mutex<Inner>,
    capacity: usize,
    ttl_millis: i64,
    clock: Arc<dyn Clock>,
}

impl ExplanationCache {
    /// Create a cache backed by the system clock
    pub fn new(config: &CacheConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit time source
    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let capacity = NonZeroUsize::new(config.capacity)
            .ok_or_else(|| AppError::Config("cache capacity must be at least 1".to_string()))?;
        if config.ttl_seconds == 0 {
            return Err(AppError::Config("cache ttl_seconds must be at least 1".to_string()));
        }
        let ttl_millis = i64::try_from(config.ttl_seconds.saturating_mul(1000))
            .map_err(|_| AppError::Config("cache ttl_seconds is too large".to_string()))?;

        Ok(Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
            capacity: config.capacity,
            ttl_millis,
            clock,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up an explanation. Stale entries are purged and reported absent.
    pub fn get(&self, key: &ExplanationKey<'_>) -> Option<String> {
        let cache_key = key.cache_key();
        let now = self.clock.now_millis();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.peek(&cache_key) {
            Some(entry) if now - entry.inserted_at <= self.ttl_millis => {
                let explanation = entry.explanation.clone();
                inner.stats.hits += 1;
                metrics::record_cache_hit();
                debug!("Explanation cache hit: {}", &cache_key[..16]);
                return Some(explanation);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.entries.pop(&cache_key);
            inner.stats.expirations += 1;
            metrics::record_cache_expired();
            metrics::update_cache_entries(inner.entries.len());
            debug!("Explanation cache entry expired: {}", &cache_key[..16]);
        }

        inner.stats.misses += 1;
        metrics::record_cache_miss();
        None
    }

    /// Store an explanation, evicting the earliest insert when full.
    ///
    /// Overwriting an existing key refreshes its value and timestamp but
    /// keeps its place in insertion order.
    pub fn set(&self, key: &ExplanationKey<'_>, explanation: impl Into<String>) {
        let cache_key = key.cache_key();
        let explanation = explanation.into();
        let now = self.clock.now_millis();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(entry) = inner.entries.peek_mut(&cache_key) {
            entry.explanation = explanation;
            entry.inserted_at = now;
            debug!("Explanation cache entry refreshed: {}", &cache_key[..16]);
            return;
        }

        if inner.entries.len() >= self.capacity {
            if let Some((evicted, _)) = inner.entries.pop_lru() {
                inner.stats.evictions += 1;
                metrics::record_cache_eviction();
                debug!("Evicted oldest explanation: {}", &evicted[..16]);
            }
        }

        inner.entries.put(
            cache_key,
            CacheEntry {
                explanation,
                inserted_at: now,
            },
        );
        metrics::update_cache_entries(inner.entries.len());
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        metrics::update_cache_entries(0);
        debug!("Explanation cache cleared");
    }

    /// Remove all entries older than the TTL. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let stale: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| now - entry.inserted_at > self.ttl_millis)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            inner.entries.pop(key);
        }

        if !stale.is_empty() {
            inner.stats.expirations += stale.len() as u64;
            metrics::update_cache_entries(inner.entries.len());
            debug!("Purged {} expired explanations", stale.len());
        }

        stale.len()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_millis();
        let inner = self.inner.lock();

        CacheStats {
            size: inner.entries.len(),
            oldest_entry: inner
                .entries
                .iter()
                .map(|(_, entry)| entry.inserted_at)
                .min()
                .unwrap_or(now),
            ..inner.stats.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn cache_with_clock(start: i64) -> (ExplanationCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start));
        let cache = ExplanationCache::with_clock(&CacheConfig::default(), clock.clone()).unwrap();
        (cache, clock)
    }

    #[test]
    fn test_capacity_evicts_first_inserted() {
        let (cache, _) = cache_with_clock(0);
        let ids: Vec<String> = (0..101).map(|i| format!("q{}", i)).collect();

        for id in &ids {
            cache.set(&ExplanationKey::new(id, "A"), format!("explanation for {}", id));
        }

        assert_eq!(cache.len(), 100);
        assert_eq!(cache.get(&ExplanationKey::new("q0", "A")), None);
        assert_eq!(
            cache.get(&ExplanationKey::new("q1", "A")).as_deref(),
            Some("explanation for q1")
        );
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_ttl_boundary() {
        let (cache, clock) = cache_with_clock(1_000);
        let key = ExplanationKey::new("Q1", "A");
        cache.set(&key, "x");

        clock.set(1_000 + DAY_MS - 1);
        assert_eq!(cache.get(&key).as_deref(), Some("x"));

        clock.set(1_000 + DAY_MS + 1);
        assert_eq!(cache.get(&key), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_exact_ttl_is_still_fresh() {
        let (cache, clock) = cache_with_clock(0);
        let key = ExplanationKey::new("Q1", "A");
        cache.set(&key, "x");

        clock.set(DAY_MS);
        assert_eq!(cache.get(&key).as_deref(), Some("x"));
    }

    #[test]
    fn test_key_independence() {
        let (cache, _) = cache_with_clock(0);
        cache.set(&ExplanationKey::new("Q1", "A"), "x");

        assert_eq!(cache.get(&ExplanationKey::new("Q1", "B")), None);
        assert_eq!(cache.get(&ExplanationKey::new("Q2", "A")), None);
        assert_eq!(cache.get(&ExplanationKey::new("Q1", "A")).as_deref(), Some("x"));
    }

    #[test]
    fn test_composite_key_does_not_collide_on_separator() {
        let a = ExplanationKey::new("a:b", "c").cache_key();
        let b = ExplanationKey::new("a", "b:c").cache_key();
        assert_ne!(a, b);
    }

    #[test]
    fn test_overwrite_keeps_insertion_position() {
        let config = CacheConfig {
            capacity: 2,
            ..CacheConfig::default()
        };
        let clock = Arc::new(ManualClock::new(0));
        let cache = ExplanationCache::with_clock(&config, clock.clone()).unwrap();

        cache.set(&ExplanationKey::new("first", "A"), "1");
        clock.advance(10);
        cache.set(&ExplanationKey::new("second", "A"), "2");
        clock.advance(10);
        // Refresh "first"; it must still be the eviction candidate
        cache.set(&ExplanationKey::new("first", "A"), "1b");
        cache.set(&ExplanationKey::new("third", "A"), "3");

        assert_eq!(cache.get(&ExplanationKey::new("first", "A")), None);
        assert_eq!(cache.get(&ExplanationKey::new("second", "A")).as_deref(), Some("2"));
        assert_eq!(cache.get(&ExplanationKey::new("third", "A")).as_deref(), Some("3"));
    }

    #[test]
    fn test_reads_do_not_promote() {
        let config = CacheConfig {
            capacity: 2,
            ..CacheConfig::default()
        };
        let cache = ExplanationCache::with_clock(&config, Arc::new(ManualClock::new(0))).unwrap();

        cache.set(&ExplanationKey::new("a", "x"), "a");
        cache.set(&ExplanationKey::new("b", "x"), "b");
        assert!(cache.get(&ExplanationKey::new("a", "x")).is_some());
        cache.set(&ExplanationKey::new("c", "x"), "c");

        assert_eq!(cache.get(&ExplanationKey::new("a", "x")), None);
    }

    #[test]
    fn test_miss_does_not_change_size() {
        let (cache, _) = cache_with_clock(0);
        cache.set(&ExplanationKey::new("Q1", "A"), "x");
        assert_eq!(cache.get(&ExplanationKey::new("nope", "A")), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let (cache, _) = cache_with_clock(0);
        cache.set(&ExplanationKey::new("Q1", "A"), "x");
        cache.set(&ExplanationKey::new("Q2", "A"), "y");
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&ExplanationKey::new("Q1", "A")), None);
    }

    #[test]
    fn test_stats_oldest_entry() {
        let (cache, clock) = cache_with_clock(5_000);
        assert_eq!(cache.stats().oldest_entry, 5_000);

        cache.set(&ExplanationKey::new("Q1", "A"), "x");
        clock.advance(100);
        cache.set(&ExplanationKey::new("Q2", "A"), "y");
        clock.advance(100);

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.oldest_entry, 5_000);
    }

    #[test]
    fn test_purge_expired() {
        let (cache, clock) = cache_with_clock(0);
        cache.set(&ExplanationKey::new("old", "A"), "x");
        clock.advance(DAY_MS);
        cache.set(&ExplanationKey::new("new", "A"), "y");
        clock.advance(1);

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&ExplanationKey::new("new", "A")).is_some());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = CacheConfig {
            capacity: 0,
            ..CacheConfig::default()
        };
        assert!(ExplanationCache::new(&config).is_err());
    }
}
