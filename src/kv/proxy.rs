//! Cache Proxy Module
//!
//! Read-through cache in front of the [`Store`]. Mutations are written through
//! to the store and the cache is kept coherent with them.
//!
//! Every public operation holds the proxy mutex for its full duration,
//! including the nested store call. Lock order is always proxy mutex first,
//! store lock second.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::kv::{Entry, Outcome, ProxyStats, Store};

/// Cache map and counters, guarded together by the proxy mutex.
#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, Entry>,
    stats: ProxyStats,
}

// == Cache Proxy ==
/// Caching front for a shared [`Store`].
#[derive(Debug)]
pub struct CacheProxy {
    store: Arc<Store>,
    cache: Mutex<CacheState>,
}

impl CacheProxy {
    // == Constructor ==
    /// Creates a proxy with an empty cache in front of `store`.
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            cache: Mutex::new(CacheState::default()),
        }
    }

    /// The store this proxy fronts.
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    // == Get ==
    /// Returns the value for `key`, serving from the cache when possible.
    ///
    /// On a miss the store is consulted and, if the key exists, its entry is
    /// cached before returning.
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut cache = self.cache.lock().await;

        if let Some(entry) = cache.entries.get(key) {
            let value = entry.value.clone();
            cache.stats.record_hit();
            debug!(key, "cache hit");
            return Some(value);
        }

        cache.stats.record_miss();
        let entry = self.store.get_entry(key).await?;
        debug!(key, "cache miss, seeded from store");
        let value = entry.value.clone();
        cache.entries.insert(key.to_string(), entry);
        Some(value)
    }

    // == Set ==
    /// Writes through to the store without seeding the cache.
    ///
    /// Any cached entry for the key is dropped so the next read re-fetches.
    pub async fn set(&self, key: &str, value: impl Into<String>) -> bool {
        let mut cache = self.cache.lock().await;
        cache.entries.remove(key);
        self.store.set(key, value).await
    }

    // == Update ==
    /// Updates an existing key in the store and refreshes its cached copy.
    ///
    /// Existence is decided by the store, never by the cache, so this never
    /// creates a key.
    pub async fn update(&self, key: &str, value: impl Into<String>) -> Outcome {
        let mut cache = self.cache.lock().await;
        match self.store.replace_existing(key, value).await {
            Some(entry) => {
                if let Some(cached) = cache.entries.get_mut(key) {
                    *cached = entry;
                }
                Outcome::Updated
            }
            None => Outcome::NotFound,
        }
    }

    // == Delete ==
    /// Evicts `key` from the cache unconditionally, then deletes it from the
    /// store.
    pub async fn delete(&self, key: &str) -> Outcome {
        let mut cache = self.cache.lock().await;
        cache.entries.remove(key);
        self.store.delete(key).await
    }

    // == Purge Expired ==
    /// Removes keys older than `ttl` from both the store and the cache.
    ///
    /// The proxy mutex and the store's exclusive lock are held together, so no
    /// reader sees a key that is gone from one map but not the other.
    pub async fn purge_expired(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let mut cache = self.cache.lock().await;
        let expired = self.store.remove_expired(now, ttl).await;
        for key in &expired {
            cache.entries.remove(key);
        }
        cache.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Introspection ==
    /// Returns a copy of the proxy counters.
    pub async fn stats(&self) -> ProxyStats {
        let cache = self.cache.lock().await;
        let mut stats = cache.stats.clone();
        stats.cached_entries = cache.entries.len();
        stats
    }

    /// True if `key` currently has a cached entry.
    pub async fn is_cached(&self, key: &str) -> bool {
        self.cache.lock().await.entries.contains_key(key)
    }

    pub async fn cached_len(&self) -> usize {
        self.cache.lock().await.entries.len()
    }
}
