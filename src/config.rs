//! Configuration Module
//!
//! Cache and in-memory store settings, loaded from environment variables or
//! built from defaults.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Expiration applied to discovery documents on the single-item path: one day.
pub const DEFAULT_MAX_AGE_SECS: u64 = 60 * 60 * 24;

/// Chunk size that keeps each item under a 1 MB per-item store ceiling.
pub const DEFAULT_CHUNK_SIZE: usize = 950_000;

/// Number of chunk keys requested on a chunked read.
pub const DEFAULT_CHUNK_BOUND: usize = 32;

/// Per-item ceiling of the in-memory store, matching memcache's 1 MiB.
pub const DEFAULT_ITEM_SIZE_LIMIT: usize = 1024 * 1024;

/// Default capacity of the in-memory store.
pub const DEFAULT_MAX_ITEMS: usize = 1024;

// == Cache Config ==
/// Immutable settings of a [`ChunkedCache`](crate::cache::ChunkedCache).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Expiration of single-item writes
    pub max_age: Duration,
    /// Store values as `key.index` chunks instead of a single item
    pub use_multi: bool,
    /// Maximum bytes per chunk
    pub chunk_size: usize,
    /// Number of chunks read back on retrieval
    pub chunk_bound: usize,
}

impl CacheConfig {
    // == Constructor ==
    /// Creates a config with the given expiration and storage mode, using
    /// default chunk settings.
    pub fn new(max_age: Duration, use_multi: bool) -> Self {
        Self {
            max_age,
            use_multi,
            ..Self::default()
        }
    }

    // == From Env ==
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DISCOVERY_CACHE_MAX_AGE` - Expiration in seconds (default: 86400)
    /// - `DISCOVERY_CACHE_USE_MULTI` - Chunked storage on/off (default: true)
    /// - `DISCOVERY_CACHE_CHUNK_SIZE` - Bytes per chunk (default: 950000)
    /// - `DISCOVERY_CACHE_CHUNK_BOUND` - Chunks read per get (default: 32)
    pub fn from_env() -> Self {
        Self {
            max_age: Duration::from_secs(
                env_parse("DISCOVERY_CACHE_MAX_AGE").unwrap_or(DEFAULT_MAX_AGE_SECS),
            ),
            use_multi: env_parse("DISCOVERY_CACHE_USE_MULTI").unwrap_or(true),
            chunk_size: env_parse_nonzero("DISCOVERY_CACHE_CHUNK_SIZE")
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            chunk_bound: env_parse_nonzero("DISCOVERY_CACHE_CHUNK_BOUND")
                .unwrap_or(DEFAULT_CHUNK_BOUND),
        }
    }

    // == Builders ==
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_use_multi(mut self, use_multi: bool) -> Self {
        self.use_multi = use_multi;
        self
    }

    /// Sets the chunk size; zero is raised to one byte.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets the chunk bound; zero is raised to one chunk.
    pub fn with_chunk_bound(mut self, chunk_bound: usize) -> Self {
        self.chunk_bound = chunk_bound.max(1);
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::from_secs(DEFAULT_MAX_AGE_SECS),
            use_multi: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_bound: DEFAULT_CHUNK_BOUND,
        }
    }
}

// == Memory Store Config ==
/// Settings of the in-process [`MemoryStore`](crate::store::MemoryStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStoreConfig {
    /// Maximum number of items before LRU eviction kicks in
    pub max_items: usize,
    /// Largest value accepted for a single item, in bytes
    pub item_size_limit: usize,
}

impl MemoryStoreConfig {
    // == From Env ==
    /// Creates a new MemoryStoreConfig by loading values from environment
    /// variables.
    ///
    /// # Environment Variables
    /// - `MEMORY_STORE_MAX_ITEMS` - Capacity in items (default: 1024)
    /// - `MEMORY_STORE_ITEM_SIZE_LIMIT` - Per-item ceiling in bytes (default: 1048576)
    pub fn from_env() -> Self {
        Self {
            max_items: env_parse_nonzero("MEMORY_STORE_MAX_ITEMS").unwrap_or(DEFAULT_MAX_ITEMS),
            item_size_limit: env_parse_nonzero("MEMORY_STORE_ITEM_SIZE_LIMIT")
                .unwrap_or(DEFAULT_ITEM_SIZE_LIMIT),
        }
    }
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            item_size_limit: DEFAULT_ITEM_SIZE_LIMIT,
        }
    }
}

// == Env Helpers ==
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_parse_nonzero(name: &str) -> Option<usize> {
    env_parse::<usize>(name).filter(|v| *v > 0)
}
