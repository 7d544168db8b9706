//! Entry Module
//!
//! Defines stored entries and the outcomes of conditional mutations.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Entry ==
/// A stored value together with the moment it was last written.
///
/// Entries are never modified in place; every write builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The stored value
    #[serde(rename = "Value")]
    pub value: String,
    /// Wall-clock time of the write that produced this entry
    #[serde(rename = "Timestamp")]
    pub written_at: DateTime<Utc>,
}

impl Entry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_timestamp(value, Utc::now())
    }

    /// Creates an entry with an explicit write time.
    pub fn with_timestamp(value: impl Into<String>, written_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            written_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `ttl` as seen from `now`.
    ///
    /// Boundary condition: an entry is expired only once its age strictly
    /// exceeds the TTL. If `now` is earlier than `written_at` (the clock moved
    /// backwards) the entry counts as fresh.
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match now.signed_duration_since(self.written_at).to_std() {
            Ok(age) => age > ttl,
            Err(_) => false,
        }
    }
}

// == Outcome ==
/// Result of an update or delete against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Deleted,
    NotFound,
}

impl Outcome {
    /// Wire representation used in response messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Updated => "UPDATED",
            Outcome::Deleted => "DELETED",
            Outcome::NotFound => "NOT_FOUND",
        }
    }

    /// True when the key existed and the mutation was applied.
    pub fn succeeded(&self) -> bool {
        !matches!(self, Outcome::NotFound)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_entry_creation() {
        let before = Utc::now();
        let entry = Entry::new("test_value");
        assert_eq!(entry.value, "test_value");
        assert!(entry.written_at >= before);
    }

    #[test]
    fn test_fresh_entry_not_expired() {
        let entry = Entry::new("v");
        assert!(!entry.is_expired_at(Utc::now(), Duration::from_secs(60)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let written = Utc::now();
        let entry = Entry::with_timestamp("v", written);
        let ttl = Duration::from_secs(10);

        // Exactly at TTL the entry is still live
        assert!(!entry.is_expired_at(written + TimeDelta::seconds(10), ttl));
        // One millisecond past TTL it is expired
        assert!(entry.is_expired_at(written + TimeDelta::milliseconds(10_001), ttl));
    }

    #[test]
    fn test_clock_moving_backwards_keeps_entry() {
        let written = Utc::now();
        let entry = Entry::with_timestamp("v", written);
        let earlier = written - TimeDelta::hours(1);
        assert!(!entry.is_expired_at(earlier, Duration::ZERO));
    }

    #[test]
    fn test_entry_serializes_with_snapshot_field_names() {
        let entry = Entry::new("John");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["Value"], "John");
        assert!(json["Timestamp"].is_string());
    }

    #[test]
    fn test_outcome_strings() {
        assert_eq!(Outcome::Updated.as_str(), "UPDATED");
        assert_eq!(Outcome::Deleted.to_string(), "DELETED");
        assert_eq!(Outcome::NotFound.as_str(), "NOT_FOUND");
        assert!(Outcome::Updated.succeeded());
        assert!(Outcome::Deleted.succeeded());
        assert!(!Outcome::NotFound.succeeded());
    }
}
