//! Proxy Statistics Module
//!
//! Tracks cache hits, misses and TTL expirations seen by the caching proxy.

// == Proxy Stats ==
/// Counters maintained by the caching proxy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyStats {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that fell through to the store
    pub misses: u64,
    /// Keys removed by the expiration sweeper
    pub expirations: u64,
    /// Current number of cached entries
    pub cached_entries: usize,
}

impl ProxyStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Adds `count` keys to the expiration counter.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = ProxyStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.expirations, 0);
        assert_eq!(stats.cached_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(ProxyStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = ProxyStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_expirations() {
        let mut stats = ProxyStats::new();
        stats.record_expirations(2);
        stats.record_expirations(0);
        stats.record_expirations(3);
        assert_eq!(stats.expirations, 5);
    }
}
