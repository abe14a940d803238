//! Property-Based Tests for the Chunked Cache
//!
//! Uses proptest to check round-trip, bound and isolation behaviour over
//! arbitrary documents and chunk sizes.

use proptest::prelude::*;
use std::sync::Arc;

use crate::cache::ChunkedCache;
use crate::chunk::HEADER_LEN;
use crate::config::CacheConfig;
use crate::store::MemoryStore;

// == Strategies ==
/// Generates cache keys shaped like discovery URLs
fn url_key_strategy() -> impl Strategy<Value = String> {
    "https://[a-z]{1,12}\\.googleapis\\.com/\\$discovery/rest\\?version=v[0-9]{1,2}"
}

/// Generates document bodies, including characters JSON must escape
fn document_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 {}\":,\\[\\]\\\\\n\u{e9}]{0,300}"
}

/// Bytes written for `doc` on the chunked path, header included
fn framed_len(doc: &str) -> usize {
    HEADER_LEN + serde_json::to_vec(doc).unwrap().len()
}

fn cache_with(chunk_size: usize, chunk_bound: usize) -> ChunkedCache<Arc<MemoryStore>> {
    ChunkedCache::new(
        Arc::new(MemoryStore::default()),
        CacheConfig::default()
            .with_chunk_size(chunk_size)
            .with_chunk_bound(chunk_bound),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any document whose chunks fit under the bound reads back byte-exact.
    #[test]
    fn prop_round_trip_within_bound(
        key in url_key_strategy(),
        doc in document_strategy(),
        chunk_size in 1usize..64,
    ) {
        let chunks = framed_len(&doc).div_ceil(chunk_size);
        let cache = cache_with(chunk_size, chunks);

        let cached = tokio_test::block_on(async {
            cache.set(&key, &doc).await;
            cache.get::<String>(&key).await
        });

        prop_assert_eq!(cached, Some(doc));
    }

    // A document needing more chunks than are read back is never served,
    // truncated or otherwise.
    #[test]
    fn prop_over_bound_reads_as_miss(
        key in url_key_strategy(),
        doc in document_strategy(),
        chunk_size in 1usize..16,
    ) {
        let chunks = framed_len(&doc).div_ceil(chunk_size);
        prop_assume!(chunks >= 2);
        let cache = cache_with(chunk_size, chunks - 1);

        let cached = tokio_test::block_on(async {
            cache.set(&key, &doc).await;
            cache.get::<String>(&key).await
        });

        prop_assert_eq!(cached, None);
    }

    // Writes under one key never change what another key reads back.
    #[test]
    fn prop_keys_are_isolated(
        first_key in url_key_strategy(),
        second_key in url_key_strategy(),
        first_doc in document_strategy(),
        second_doc in document_strategy(),
        chunk_size in 4usize..32,
    ) {
        prop_assume!(first_key != second_key);
        let cache = cache_with(chunk_size, 1024);

        let (first, second) = tokio_test::block_on(async {
            cache.set(&first_key, &first_doc).await;
            cache.set(&second_key, &second_doc).await;
            (
                cache.get::<String>(&first_key).await,
                cache.get::<String>(&second_key).await,
            )
        });

        prop_assert_eq!(first, Some(first_doc));
        prop_assert_eq!(second, Some(second_doc));
    }

    // Overwriting with any other document serves the latest one, whatever
    // the relative lengths.
    #[test]
    fn prop_overwrite_serves_latest(
        key in url_key_strategy(),
        old_doc in document_strategy(),
        new_doc in document_strategy(),
        chunk_size in 4usize..32,
    ) {
        let cache = cache_with(chunk_size, 1024);

        let cached = tokio_test::block_on(async {
            cache.set(&key, &old_doc).await;
            cache.set(&key, &new_doc).await;
            cache.get::<String>(&key).await
        });

        prop_assert_eq!(cached, Some(new_doc));
    }
}
