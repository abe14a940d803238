//! Store Statistics Module
//!
//! Hit, miss and eviction counters of the in-memory store.

use serde::Serialize;

// == Store Stats ==
/// Counters describing in-memory store activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Reads that found a live item
    pub hits: u64,
    /// Reads of absent or expired items
    pub misses: u64,
    /// Items dropped to make room for new ones or evicted explicitly
    pub evictions: u64,
    /// Items currently held, expired ones included until read
    pub total_items: usize,
}

impl StoreStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = StoreStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();

        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn test_serializes_counters() {
        let mut stats = StoreStats::new();
        stats.record_eviction();
        stats.total_items = 7;

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["evictions"], 1);
        assert_eq!(json["total_items"], 7);
        assert_eq!(json["hits"], 0);
    }
}
