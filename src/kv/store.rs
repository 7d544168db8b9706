//! Store Module
//!
//! Authoritative key-value map. Knows nothing about caching or networking and
//! does not enforce TTL on reads; expiry is applied by the sweeper.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::kv::{Entry, Outcome, Snapshot};

// == Store ==
/// Key-value map guarded by a reader/writer lock.
///
/// Reads share the lock; writes, sweeps and snapshots take it exclusively.
#[derive(Debug, Default)]
pub struct Store {
    entries: RwLock<HashMap<String, Entry>>,
}

impl Store {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns the value for `key`, or None if the key is absent.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.get_entry(key).await.map(|entry| entry.value)
    }

    /// Returns the whole entry for `key`, write time included.
    pub async fn get_entry(&self, key: &str) -> Option<Entry> {
        self.entries.read().await.get(key).cloned()
    }

    // == Set ==
    /// Inserts or replaces `key` unconditionally. Always succeeds.
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.entries
            .write()
            .await
            .insert(key.into(), Entry::new(value));
        true
    }

    // == Update ==
    /// Replaces the value of an existing key. Never creates a key.
    pub async fn update(&self, key: &str, value: impl Into<String>) -> Outcome {
        match self.replace_existing(key, value).await {
            Some(_) => Outcome::Updated,
            None => Outcome::NotFound,
        }
    }

    /// Replaces an existing key and returns the entry now stored for it.
    ///
    /// Returns None, leaving the map untouched, if the key is absent.
    pub(crate) async fn replace_existing(
        &self,
        key: &str,
        value: impl Into<String>,
    ) -> Option<Entry> {
        let mut entries = self.entries.write().await;
        let slot = entries.get_mut(key)?;
        *slot = Entry::new(value);
        Some(slot.clone())
    }

    // == Delete ==
    /// Removes `key` if present.
    pub async fn delete(&self, key: &str) -> Outcome {
        match self.entries.write().await.remove(key) {
            Some(_) => Outcome::Deleted,
            None => Outcome::NotFound,
        }
    }

    // == Remove Expired ==
    /// Removes every entry older than `ttl` as of `now`.
    ///
    /// Runs as a single pass under the exclusive lock and returns the removed
    /// keys.
    pub async fn remove_expired(&self, now: DateTime<Utc>, ttl: Duration) -> Vec<String> {
        let mut entries = self.entries.write().await;
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now, ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.remove(key);
        }
        expired
    }

    // == Snapshot ==
    /// Copies the current contents into an immutable [`Snapshot`].
    ///
    /// Takes the exclusive lock so no write is observed half-applied.
    pub async fn snapshot(&self) -> Snapshot {
        let entries = self.entries.write().await;
        entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect()
    }

    // == Length ==
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[tokio::test]
    async fn test_store_new() {
        let store = Store::new();
        assert_eq!(store.len().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_set_and_get() {
        let store = Store::new();

        assert!(store.set("key1", "value1").await);
        assert_eq!(store.get("key1").await.as_deref(), Some("value1"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_nonexistent() {
        let store = Store::new();
        assert_eq!(store.get("nonexistent").await, None);
    }

    #[tokio::test]
    async fn test_store_overwrite_refreshes_timestamp() {
        let store = Store::new();

        store.set("key1", "value1").await;
        let first = store.get_entry("key1").await.unwrap();
        store.set("key1", "value2").await;
        let second = store.get_entry("key1").await.unwrap();

        assert_eq!(second.value, "value2");
        assert!(second.written_at >= first.written_at);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_update_existing() {
        let store = Store::new();
        store.set("key1", "old").await;

        assert_eq!(store.update("key1", "new").await, Outcome::Updated);
        assert_eq!(store.get("key1").await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_store_update_missing_does_not_create() {
        let store = Store::new();

        assert_eq!(store.update("ghost", "x").await, Outcome::NotFound);
        assert_eq!(store.get("ghost").await, None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_delete() {
        let store = Store::new();
        store.set("key1", "value1").await;

        assert_eq!(store.delete("key1").await, Outcome::Deleted);
        assert_eq!(store.get("key1").await, None);
        assert_eq!(store.delete("key1").await, Outcome::NotFound);
    }

    #[tokio::test]
    async fn test_store_remove_expired() {
        let store = Store::new();
        store.set("old", "1").await;
        store.set("also_old", "2").await;

        let later = Utc::now() + TimeDelta::seconds(30);
        let mut removed = store.remove_expired(later, Duration::from_secs(10)).await;
        removed.sort();

        assert_eq!(removed, vec!["also_old".to_string(), "old".to_string()]);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_remove_expired_keeps_fresh() {
        let store = Store::new();
        store.set("fresh", "1").await;

        let removed = store.remove_expired(Utc::now(), Duration::from_secs(60)).await;
        assert!(removed.is_empty());
        assert_eq!(store.get("fresh").await.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_store_snapshot_matches_contents() {
        let store = Store::new();
        store.set("a", "1").await;
        store.set("b", "2").await;
        store.delete("a").await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.value("b"), Some("2"));
    }
}
