//! Cache Module
//!
//! The chunked discovery-document cache and the contract discovery clients
//! program against.

mod chunked;

#[cfg(test)]
mod property_tests;

use async_trait::async_trait;

pub use chunked::ChunkedCache;

use crate::store::KvStore;

// == Public Constants ==
/// Keyspace of single-item writes inside the backing store.
pub const NAMESPACE: &str = "google-api-client";

// == Discovery Cache Trait ==
/// Cache of discovery documents keyed by URL.
///
/// Implementations never fail: every problem is a miss on read and a no-op
/// on write, and callers fall back to fetching the document.
#[async_trait]
pub trait DiscoveryCache: Send + Sync {
    /// Returns the cached document for `url`, if any.
    async fn get(&self, url: &str) -> Option<String>;

    /// Caches `content` under `url`.
    async fn set(&self, url: &str, content: &str);
}

#[async_trait]
impl<S: KvStore> DiscoveryCache for ChunkedCache<S> {
    async fn get(&self, url: &str) -> Option<String> {
        ChunkedCache::get::<String>(self, url).await
    }

    async fn set(&self, url: &str, content: &str) {
        ChunkedCache::set(self, url, content).await
    }
}
