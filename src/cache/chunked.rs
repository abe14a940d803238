//! Chunked Cache Module
//!
//! Stores serialized values either as one namespaced item or as a run of
//! `key.index` chunks, each below the store's per-item size ceiling.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::NAMESPACE;
use crate::chunk;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::store::KvStore;

// == Chunked Cache ==
/// Value cache on top of a [`KvStore`] client.
///
/// `get` and `set` never fail: errors are logged and surface as a miss or a
/// dropped write. `try_get` and `try_set` expose the same operations with
/// the error.
///
/// Chunked writes carry no expiration, only single-item writes use
/// `max_age`. Chunks of one key are not written or read atomically:
/// interleaved writers or partial eviction normally read back as a miss.
#[derive(Debug)]
pub struct ChunkedCache<S> {
    store: S,
    config: CacheConfig,
}

impl<S: KvStore> ChunkedCache<S> {
    // == Constructor ==
    /// Creates a cache over `store`. The config is fixed for the cache's
    /// lifetime.
    pub fn new(store: S, config: CacheConfig) -> Self {
        Self { store, config }
    }

    // == Config ==
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Store ==
    pub fn store(&self) -> &S {
        &self.store
    }

    // == Get ==
    /// Reads the value cached under `key`, or None on a miss or any failure.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key).await {
            Ok(value) => Some(value),
            Err(e) if e.is_miss() => {
                debug!(key = %key, "Cache miss");
                None
            }
            Err(e) => {
                warn!(key = %key, error = %e, details = ?e, "Cache read failed");
                None
            }
        }
    }

    // == Try Get ==
    /// Reads the value cached under `key`.
    pub async fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let bytes = if self.config.use_multi {
            self.read_chunks(key).await?
        } else {
            self.store
                .get(key, NAMESPACE)
                .await?
                .ok_or_else(|| CacheError::Miss(key.to_string()))?
        };

        serde_json::from_slice(&bytes).map_err(CacheError::Decode)
    }

    // == Read Chunks ==
    async fn read_chunks(&self, key: &str) -> Result<Vec<u8>> {
        let keys = chunk::candidate_keys(key, self.config.chunk_bound);
        let fetched = self.store.get_multi(&keys).await?;
        let chunks = fetched.len();

        let bytes = chunk::reassemble(key, fetched)?;
        debug!(key = %key, chunks, bytes = bytes.len(), "Reassembled chunked value");
        Ok(bytes)
    }

    // == Set ==
    /// Caches `value` under `key`. Failures are logged and the write dropped.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value).await {
            warn!(key = %key, error = %e, details = ?e, "Cache write failed");
        }
    }

    // == Try Set ==
    /// Caches `value` under `key`.
    ///
    /// Chunked writes only cover the chunks of the new value; chunks of a
    /// longer earlier value stay behind and are ignored on read.
    pub async fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let serialized = serde_json::to_vec(value).map_err(CacheError::Encode)?;

        if !self.config.use_multi {
            self.store
                .set(key, serialized, self.config.max_age, NAMESPACE)
                .await?;
            return Ok(());
        }

        let bytes = serialized.len();
        let items = chunk::split(key, &chunk::frame(&serialized), self.config.chunk_size);
        let chunks = items.len();
        if chunks > self.config.chunk_bound {
            // Reads stop at chunk_bound, so this value will never be served.
            debug!(
                key = %key,
                chunks,
                chunk_bound = self.config.chunk_bound,
                "Value exceeds readable chunk bound"
            );
        }

        let rejected = self.store.set_multi(items).await?;
        if !rejected.is_empty() {
            return Err(CacheError::PartialWrite {
                key: key.to_string(),
                rejected,
            });
        }

        debug!(key = %key, chunks, bytes, "Stored chunked value");
        Ok(())
    }
}
