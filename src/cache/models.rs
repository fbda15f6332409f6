//! Explanation cache configuration, keys and statistics.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Configuration for the explanation cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of explanations held at once.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Age in seconds after which an entry is treated as absent.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Interval for the background expiry sweep. `0` disables it and leaves
    /// expiry purely lazy.
    #[serde(default)]
    pub sweep_interval_seconds: u64,
}

impl Default for CacheConfig {
    /// Provides default values for cache configuration.
    ///
    /// - `capacity`: 100
    /// - `ttl_seconds`: 86400 (24 hours)
    /// - `sweep_interval_seconds`: 0 (disabled)
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            ttl_seconds: default_ttl_seconds(),
            sweep_interval_seconds: 0,
        }
    }
}

fn default_capacity() -> usize {
    100
}

fn default_ttl_seconds() -> u64 {
    24 * 60 * 60
}

/// Identity of a cached explanation: the question and the answer given to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplanationKey<'a> {
    pub question_id: &'a str,
    pub answer: &'a str,
}

impl<'a> ExplanationKey<'a> {
    pub fn new(question_id: &'a str, answer: &'a str) -> Self {
        Self {
            question_id,
            answer,
        }
    }

    /// Combine both parts into the single string the cache is keyed by.
    ///
    /// The parts are length-prefixed before hashing so that
    /// `("a:b", "c")` and `("a", "b:c")` never collide.
    pub fn cache_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.question_id.len() as u64).to_le_bytes());
        hasher.update(self.question_id.as_bytes());
        hasher.update((self.answer.len() as u64).to_le_bytes());
        hasher.update(self.answer.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Snapshot of cache state and counters.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of entries currently held (expired-but-unread entries included).
    pub size: usize,
    /// Earliest insertion timestamp in epoch milliseconds, or "now" when empty.
    pub oldest_entry: i64,
    /// Number of lookups that returned a value.
    pub hits: u64,
    /// Number of lookups that found nothing.
    pub misses: u64,
    /// Number of entries found stale and purged.
    pub expirations: u64,
    /// Number of entries removed to make room for new ones.
    pub evictions: u64,
}
