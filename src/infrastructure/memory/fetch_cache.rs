//! In-Memory Fetch Cache Implementation

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::application::ports::{CacheStats, Clock, FetchCachePort, SystemClock};

/// 缓存条目
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Arc<Value>,
    fetched_at: DateTime<Utc>,
}

/// 内存 Fetch Cache
///
/// 进程生命周期内构造一次，注入到所有发起上游请求的协作者
pub struct InMemoryFetchCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl InMemoryFetchCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.fetched_at < self.ttl
    }
}

impl FetchCachePort for InMemoryFetchCache {
    fn get_fresh(&self, key: &str) -> Option<Arc<Value>> {
        let now = self.clock.now();
        let value = self
            .entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.value.clone());

        match &value {
            Some(_) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(cache_key = %key, "Fetch cache hit");
            }
            None => {
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(cache_key = %key, "Fetch cache miss");
            }
        }
        value
    }

    fn contains_fresh(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .get(key)
            .map(|entry| self.is_fresh(&entry, now))
            .unwrap_or(false)
    }

    fn put(&self, key: &str, value: Value) -> Arc<Value> {
        let value = Arc::new(value);
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                fetched_at: self.clock.now(),
            },
        );
        tracing::debug!(cache_key = %key, "Fetch cache stored");
        value
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        CacheStats {
            total_entries: self.entries.len(),
            fresh_entries: self
                .entries
                .iter()
                .filter(|entry| self.is_fresh(entry.value(), now))
                .count(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ManualClock;
    use serde_json::json;

    fn cache_with_clock() -> (InMemoryFetchCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = InMemoryFetchCache::with_clock(Duration::minutes(5), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_fresh_entry_returns_same_payload() {
        let (cache, clock) = cache_with_clock();
        let stored = cache.put("books:b1", json!([{"id": "GEN"}]));

        clock.advance(Duration::minutes(4));
        let read = cache.get_fresh("books:b1").unwrap();
        assert!(Arc::ptr_eq(&stored, &read));
        assert!(cache.contains_fresh("books:b1"));
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.put("books:b1", json!([]));

        clock.advance(Duration::minutes(5));
        assert!(cache.get_fresh("books:b1").is_none());
        assert!(!cache.contains_fresh("books:b1"));
        // 过期条目不会被主动移除
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites_and_refreshes_timestamp() {
        let (cache, clock) = cache_with_clock();
        cache.put("k", json!(1));
        clock.advance(Duration::minutes(6));
        cache.put("k", json!(2));

        assert_eq!(*cache.get_fresh("k").unwrap(), json!(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let (cache, clock) = cache_with_clock();
        cache.put("a", json!(1));
        cache.put("b", json!(2));
        cache.get_fresh("a");
        cache.get_fresh("missing");
        clock.advance(Duration::minutes(10));
        cache.put("c", json!(3));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.fresh_entries, 1);
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
    }
}
