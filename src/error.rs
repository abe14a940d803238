//! Error types for the discovery cache
//!
//! Store clients report failures as [`StoreError`]; the chunked cache wraps
//! them, together with codec failures, in [`CacheError`].

use thiserror::Error;

// == Store Error Enum ==
/// Failure reported by a key-value store client.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached or refused the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The item exceeds the store's per-item size ceiling
    #[error("Item too large: {key} is {size} bytes, limit is {limit}")]
    ItemTooLarge {
        key: String,
        size: usize,
        limit: usize,
    },

    /// Opaque failure raised by a backend client
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Result type returned by store clients.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Cache Error Enum ==
/// Unified error type for the chunked cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The value could not be serialized
    #[error("Failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored bytes could not be deserialized
    #[error("Failed to decode value: {0}")]
    Decode(#[source] serde_json::Error),

    /// Nothing is stored under the key
    #[error("Key not found: {0}")]
    Miss(String),

    /// The chunks read end before the framed payload does
    #[error("Missing chunk {index} of {key}")]
    MissingChunk { key: String, index: usize },

    /// The store refused some of the chunks of a write
    #[error("Partial write for {key}: {} chunk(s) rejected", .rejected.len())]
    PartialWrite { key: String, rejected: Vec<String> },
}

impl CacheError {
    // == Is Miss ==
    /// Returns true for an ordinary cache miss.
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::Miss(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the chunked cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts_into_cache_error() {
        let err: CacheError = StoreError::Unavailable("connection refused".to_string()).into();
        assert!(matches!(err, CacheError::Store(StoreError::Unavailable(_))));
        assert_eq!(
            err.to_string(),
            "Store error: Store unavailable: connection refused"
        );
    }

    #[test]
    fn test_backend_error_is_transparent() {
        let err = StoreError::from(anyhow::anyhow!("socket closed"));
        assert_eq!(err.to_string(), "socket closed");
    }

    #[test]
    fn test_partial_write_message_counts_rejected_chunks() {
        let err = CacheError::PartialWrite {
            key: "doc".to_string(),
            rejected: vec!["doc.0".to_string(), "doc.3".to_string()],
        };
        assert_eq!(err.to_string(), "Partial write for doc: 2 chunk(s) rejected");
        assert!(!err.is_miss());
        assert!(CacheError::Miss("doc".to_string()).is_miss());
    }
}
