//! Stored Item Module
//!
//! A value held by the in-memory store, with its expiration deadline.

use std::time::Duration;

use chrono::Utc;

// == Stored Item ==
/// A single item of the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    /// Raw bytes as written by the client
    pub value: Vec<u8>,
    /// Write timestamp (Unix milliseconds)
    pub stored_at: i64,
    /// Expiration timestamp (Unix milliseconds), None = never expires
    pub expires_at: Option<i64>,
}

impl StoredItem {
    // == Constructor ==
    /// Creates an item expiring `expiry` from now; a zero expiry never expires.
    pub fn new(value: Vec<u8>, expiry: Duration) -> Self {
        let now = now_ms();
        let expires_at = if expiry.is_zero() {
            None
        } else {
            let millis = i64::try_from(expiry.as_millis()).unwrap_or(i64::MAX);
            Some(now.saturating_add(millis))
        };

        Self {
            value,
            stored_at: now,
            expires_at,
        }
    }

    // == Persistent ==
    /// Creates an item without expiration.
    pub fn persistent(value: Vec<u8>) -> Self {
        Self::new(value, Duration::ZERO)
    }

    // == Is Expired ==
    /// An item is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|deadline| now_ms() >= deadline)
    }
}

// == Utility Functions ==
/// Current Unix timestamp in milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
