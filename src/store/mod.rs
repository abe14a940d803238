//! Store Module
//!
//! The key-value capability the chunked cache is written against, plus an
//! in-process implementation with memcache-like semantics.

mod entry;
mod lru;
mod memory;
mod stats;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreResult;

pub use entry::StoredItem;
pub use lru::LruTracker;
pub use memory::MemoryStore;
pub use stats::StoreStats;

/// Namespace used by the batched operations, which take none.
pub const DEFAULT_NAMESPACE: &str = "";

// == Key-Value Store Trait ==
/// Client of a remote key-value cache.
///
/// An `expiry` of zero means the item never expires. The batched operations
/// work in [`DEFAULT_NAMESPACE`] and apply no expiration.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads one item, `None` if absent or expired.
    async fn get(&self, key: &str, namespace: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Writes one item.
    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        expiry: Duration,
        namespace: &str,
    ) -> StoreResult<()>;

    /// Reads several items in one round trip. Only present keys are returned.
    async fn get_multi(&self, keys: &[String]) -> StoreResult<HashMap<String, Vec<u8>>>;

    /// Writes several items in one round trip, returning the keys the store
    /// refused to store.
    async fn set_multi(&self, items: HashMap<String, Vec<u8>>) -> StoreResult<Vec<String>>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    async fn get(&self, key: &str, namespace: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key, namespace).await
    }

    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        expiry: Duration,
        namespace: &str,
    ) -> StoreResult<()> {
        (**self).set(key, value, expiry, namespace).await
    }

    async fn get_multi(&self, keys: &[String]) -> StoreResult<HashMap<String, Vec<u8>>> {
        (**self).get_multi(keys).await
    }

    async fn set_multi(&self, items: HashMap<String, Vec<u8>>) -> StoreResult<Vec<String>> {
        (**self).set_multi(items).await
    }
}
