//! Chunk Codec
//!
//! Splits serialized values into `base.index` items and puts them back
//! together.
//!
//! A chunked value is framed before splitting: an 8-byte big-endian payload
//! length, then the payload. Chunks left over from a longer earlier value
//! are cut off on read by that length.

use std::collections::HashMap;

use crate::error::{CacheError, Result};

/// Size of the length header at the start of chunk 0.
pub const HEADER_LEN: usize = 8;

// == Key Helpers ==
/// Formats the store key of chunk `index` of `base`.
pub fn chunk_key(base: &str, index: usize) -> String {
    format!("{}.{}", base, index)
}

/// Parses the chunk index out of a composite key belonging to `base`.
///
/// Returns None for keys of another base or with a non-numeric suffix.
pub fn chunk_index(base: &str, key: &str) -> Option<usize> {
    key.strip_prefix(base)?.strip_prefix('.')?.parse().ok()
}

/// Builds the keys `base.0 .. base.(bound-1)` requested on a chunked read.
pub fn candidate_keys(base: &str, bound: usize) -> Vec<String> {
    (0..bound).map(|index| chunk_key(base, index)).collect()
}

// == Frame ==
/// Prefixes `payload` with its length header.
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(HEADER_LEN + payload.len());
    framed.extend_from_slice(&(payload.len() as u64).to_be_bytes());
    framed.extend_from_slice(payload);
    framed
}

// == Split ==
/// Splits `bytes` into sequential windows of at most `chunk_size` bytes,
/// keyed by chunk key. Empty input yields no chunks.
pub fn split(base: &str, bytes: &[u8], chunk_size: usize) -> HashMap<String, Vec<u8>> {
    bytes
        .chunks(chunk_size.max(1))
        .enumerate()
        .map(|(index, window)| (chunk_key(base, index), window.to_vec()))
        .collect()
}

// == Reassemble ==
/// Rebuilds the framed payload of `base` from fetched chunks.
///
/// Chunks are ordered by their parsed numeric index and joined from index 0
/// up to the first gap; keys of other bases are ignored. The joined bytes
/// are cut to the length in the header, dropping stale trailing chunks.
///
/// Fails with [`CacheError::Miss`] if no chunk was present and with
/// [`CacheError::MissingChunk`] if the run from index 0 ends before the
/// payload does.
pub fn reassemble(base: &str, fetched: HashMap<String, Vec<u8>>) -> Result<Vec<u8>> {
    let mut chunks: Vec<(usize, Vec<u8>)> = fetched
        .into_iter()
        .filter_map(|(key, bytes)| chunk_index(base, &key).map(|index| (index, bytes)))
        .collect();

    if chunks.is_empty() {
        return Err(CacheError::Miss(base.to_string()));
    }

    // Sort on the parsed integer: "doc.10" must follow "doc.9".
    chunks.sort_unstable_by_key(|(index, _)| *index);

    let mut joined = Vec::new();
    let mut run = 0;
    for (index, bytes) in chunks {
        if index != run {
            break;
        }
        joined.extend_from_slice(&bytes);
        run += 1;
    }

    unframe(base, joined, run)
}

/// Strips the header and cuts `joined` to the recorded payload length.
/// `run` is the number of chunks joined, i.e. the first missing index.
fn unframe(base: &str, mut joined: Vec<u8>, run: usize) -> Result<Vec<u8>> {
    let missing = || CacheError::MissingChunk {
        key: base.to_string(),
        index: run,
    };

    if joined.len() < HEADER_LEN {
        return Err(missing());
    }

    let mut header = [0u8; HEADER_LEN];
    header.copy_from_slice(&joined[..HEADER_LEN]);
    let end = usize::try_from(u64::from_be_bytes(header))
        .ok()
        .and_then(|len| len.checked_add(HEADER_LEN))
        .filter(|end| *end <= joined.len())
        .ok_or_else(missing)?;

    joined.truncate(end);
    joined.drain(..HEADER_LEN);
    Ok(joined)
}
