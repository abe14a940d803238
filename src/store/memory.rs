//! In-Memory Store Module
//!
//! A [`KvStore`] held in process memory, behaving like memcache: namespaced
//! keys, per-item expiration, a per-item size ceiling and LRU eviction once
//! the item capacity is reached.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::MemoryStoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::store::{KvStore, LruTracker, StoreStats, StoredItem, DEFAULT_NAMESPACE};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ItemKey {
    namespace: String,
    key: String,
}

impl ItemKey {
    fn new(key: &str, namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            key: key.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    items: HashMap<ItemKey, StoredItem>,
    lru: LruTracker<ItemKey>,
    stats: StoreStats,
}

impl StoreInner {
    // == Lookup ==
    fn lookup(&mut self, key: &ItemKey) -> Option<Vec<u8>> {
        let expired = match self.items.get(key) {
            Some(item) => item.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove(key);
            self.stats.record_miss();
            return None;
        }

        self.lru.touch(key);
        self.stats.record_hit();
        self.items.get(key).map(|item| item.value.clone())
    }

    // == Insert ==
    /// Stores an item, evicting least recently used items first if a new
    /// key would exceed `max_items`.
    fn insert(&mut self, key: ItemKey, item: StoredItem, max_items: usize) {
        if !self.items.contains_key(&key) {
            while self.items.len() >= max_items {
                let Some(victim) = self.lru.evict_oldest() else {
                    break;
                };
                debug!(namespace = %victim.namespace, key = %victim.key, "Evicting item");
                self.items.remove(&victim);
                self.stats.record_eviction();
            }
        }
        self.lru.touch(&key);
        self.items.insert(key, item);
    }

    // == Remove ==
    fn remove(&mut self, key: &ItemKey) -> bool {
        self.lru.remove(key);
        self.items.remove(key).is_some()
    }
}

// == Memory Store ==
/// In-process key-value store with memcache-like limits.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
    config: MemoryStoreConfig,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new(config: MemoryStoreConfig) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            config: MemoryStoreConfig {
                max_items: config.max_items.max(1),
                ..config
            },
        }
    }

    // == Check Size ==
    fn check_size(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        if value.len() > self.config.item_size_limit {
            return Err(StoreError::ItemTooLarge {
                key: key.to_string(),
                size: value.len(),
                limit: self.config.item_size_limit,
            });
        }
        Ok(())
    }

    // == Evict ==
    /// Drops an item as the store would under memory pressure.
    ///
    /// Returns true if the item existed.
    pub async fn evict(&self, key: &str, namespace: &str) -> bool {
        let mut inner = self.inner.write().await;
        let removed = inner.remove(&ItemKey::new(key, namespace));
        if removed {
            inner.stats.record_eviction();
        }
        removed
    }

    // == Stats ==
    /// Snapshot of the counters, with the current item count.
    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        StoreStats {
            total_items: inner.items.len(),
            ..inner.stats.clone()
        }
    }

    // == Length ==
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.items.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(MemoryStoreConfig::default())
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    // == Get ==
    async fn get(&self, key: &str, namespace: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut inner = self.inner.write().await;
        Ok(inner.lookup(&ItemKey::new(key, namespace)))
    }

    // == Set ==
    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        expiry: Duration,
        namespace: &str,
    ) -> StoreResult<()> {
        self.check_size(key, &value)?;
        let mut inner = self.inner.write().await;
        inner.insert(
            ItemKey::new(key, namespace),
            StoredItem::new(value, expiry),
            self.config.max_items,
        );
        Ok(())
    }

    // == Get Multi ==
    async fn get_multi(&self, keys: &[String]) -> StoreResult<HashMap<String, Vec<u8>>> {
        let mut inner = self.inner.write().await;
        let found = keys
            .iter()
            .filter_map(|key| {
                inner
                    .lookup(&ItemKey::new(key, DEFAULT_NAMESPACE))
                    .map(|value| (key.clone(), value))
            })
            .collect();
        Ok(found)
    }

    // == Set Multi ==
    async fn set_multi(&self, items: HashMap<String, Vec<u8>>) -> StoreResult<Vec<String>> {
        let mut rejected = Vec::new();
        let mut inner = self.inner.write().await;
        for (key, value) in items {
            if self.check_size(&key, &value).is_err() {
                rejected.push(key);
                continue;
            }
            inner.insert(
                ItemKey::new(&key, DEFAULT_NAMESPACE),
                StoredItem::persistent(value),
                self.config.max_items,
            );
        }
        rejected.sort();
        Ok(rejected)
    }
}
