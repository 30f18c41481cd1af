//! Merkle commitment over the pending locks of a channel
//!
//! The locksroot commits to the set of pending lock hashes. Elements are
//! sorted and deduplicated, pairs are hashed smallest-first, and an odd
//! element moves up a layer unchanged.

use crate::error::{ChannelError, Result};
use sha2::{Digest, Sha256};

/// Root hash over pending locks (32 bytes)
pub type Locksroot = [u8; 32];

/// Locksroot of a channel with no pending locks
pub const EMPTY_LOCKSROOT: Locksroot = [0u8; 32];

/// Check that `bytes` is a 32-byte hash
pub fn hash32(bytes: &[u8]) -> Result<[u8; 32]> {
    bytes.try_into().map_err(|_| ChannelError::HashLengthNot32)
}

/// Hash of an encoded lock
pub fn lock_hash(encoded_lock: &[u8]) -> [u8; 32] {
    Sha256::digest(encoded_lock).into()
}

fn hash_pair(first: &[u8; 32], second: &[u8; 32]) -> [u8; 32] {
    let (low, high) = if first <= second {
        (first, second)
    } else {
        (second, first)
    };
    let mut hasher = Sha256::new();
    hasher.update(low);
    hasher.update(high);
    hasher.finalize().into()
}

/// Compute the locksroot of `elements`
///
/// Fails with [`ChannelError::HashLengthNot32`] if any element is not 32 bytes.
pub fn merkleroot<T: AsRef<[u8]>>(elements: &[T]) -> Result<Locksroot> {
    let mut layer = elements
        .iter()
        .map(|element| hash32(element.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    layer.sort_unstable();
    layer.dedup();

    if layer.is_empty() {
        return Ok(EMPTY_LOCKSROOT);
    }

    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| match pair {
                [first, second] => hash_pair(first, second),
                // odd element out
                _ => pair[0],
            })
            .collect();
    }

    Ok(layer[0])
}
