//! Snapshot Module
//!
//! Point-in-time export of the store, in a self-describing JSON layout that
//! can be loaded without a running server.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::kv::Entry;

// == Snapshot ==
/// Immutable copy of every key the store held at capture time.
///
/// Serialized as `{"data": {key: {"Value": .., "Timestamp": ..}}}` with keys
/// in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub data: BTreeMap<String, Entry>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the value recorded for `key`, if any.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|entry| entry.value.as_str())
    }

    /// Encodes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Reads a snapshot previously written by the snapshot task.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl FromIterator<(String, Entry)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, Entry)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_layout() {
        let snapshot: Snapshot = [("name".to_string(), Entry::new("John"))]
            .into_iter()
            .collect();

        let json: serde_json::Value = serde_json::from_slice(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(json["data"]["name"]["Value"], "John");
        assert!(json["data"]["name"]["Timestamp"].is_string());
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot: Snapshot = [
            ("a".to_string(), Entry::new("1")),
            ("b".to_string(), Entry::new("2")),
        ]
        .into_iter()
        .collect();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.value("b"), Some("2"));
        assert_eq!(snapshot.value("c"), None);
    }

    #[tokio::test]
    async fn test_snapshot_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        let snapshot: Snapshot = [("k".to_string(), Entry::new("v"))].into_iter().collect();
        tokio::fs::write(&path, snapshot.to_json().unwrap()).await.unwrap();

        let loaded = Snapshot::load(&path).await.unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_snapshot_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Snapshot::load(dir.path().join("absent.json")).await;
        assert!(result.is_err());
    }
}
