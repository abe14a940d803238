//! Discovery Cache - Chunked key-value caching for API discovery documents
//!
//! Stores serialized values in a remote key-value cache, splitting them into
//! chunks that fit under the store's per-item size limit.

pub mod cache;
pub mod chunk;
pub mod config;
pub mod error;
pub mod store;

pub use cache::{ChunkedCache, DiscoveryCache, NAMESPACE};
pub use config::{CacheConfig, MemoryStoreConfig};
pub use error::{CacheError, StoreError};
pub use store::{KvStore, MemoryStore};
