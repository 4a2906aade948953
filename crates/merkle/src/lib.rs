//! SHA-512 Merkle tree hashing for Roughtime (C3): domain-separated leaf/node hashes and
//! the inclusion-path walk used by the response validator's Merkle stage.
//!
//! Unlike the RFC-draft variant that truncates to the leading 32 bytes of SHA-512, this
//! implementation keeps the full 64-byte digest, matching the data model's ROOT field width.

#![forbid(unsafe_code)]

use aws_lc_rs::digest::{self, SHA512};
use thiserror::Error;

/// RFC 5.3: leaf nodes are hashed with a single 0x00 byte prepended.
const LEAF_TWEAK: &[u8] = &[0x00];

/// RFC 5.3: interior nodes are hashed with a single 0x01 byte prepended to the
/// concatenation of their two children.
const NODE_TWEAK: &[u8] = &[0x01];

/// Length of a full (untruncated) SHA-512 digest.
pub const HASH_LENGTH: usize = 64;

pub type Hash = [u8; HASH_LENGTH];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Merkle path length {0} is not a multiple of {HASH_LENGTH}")]
    InvalidPathLength(usize),
    #[error("index {0} has unconsumed bits after the path was exhausted: tree depth is too shallow for this index")]
    IndexNotExhausted(u32),
}

/// `hashLeaf(nonce)` = SHA-512(0x00 || nonce).
pub fn hash_leaf(data: &[u8]) -> Hash {
    hash(&[LEAF_TWEAK, data])
}

/// `hashNode(left, right)` = SHA-512(0x01 || left || right).
pub fn hash_node(left: &[u8], right: &[u8]) -> Hash {
    hash(&[NODE_TWEAK, left, right])
}

fn hash(parts: &[&[u8]]) -> Hash {
    let mut ctx = digest::Context::new(&SHA512);
    for part in parts {
        ctx.update(part);
    }
    let digest = ctx.finish();
    let mut out = [0u8; HASH_LENGTH];
    out.copy_from_slice(digest.as_ref());
    out
}

/// Walk a Merkle inclusion path from a leaf up to the root.
///
/// `leaf_data` is the value that was hashed into the tree's leaf (the client's nonce).
/// `index` is the leaf's position in the tree; `path` is the concatenation of sibling
/// hashes from leaf to root, each exactly [`HASH_LENGTH`] bytes. Returns the computed root,
/// which the caller compares against the signed ROOT value.
///
/// An empty `path` with `index == 0` simply returns `hash_leaf(leaf_data)`, which is the
/// singleton-batch case.
///
/// After the path is consumed, `index` must have reached `0`; any leftover bits mean the
/// claimed tree is deeper than the path actually proves, which
/// [`Error::IndexNotExhausted`] rejects rather than silently accepting a short proof.
pub fn root_from_path(leaf_data: &[u8], mut index: u32, path: &[u8]) -> Result<Hash, Error> {
    if !path.len().is_multiple_of(HASH_LENGTH) {
        return Err(Error::InvalidPathLength(path.len()));
    }

    let mut node = hash_leaf(leaf_data);

    for sibling in path.chunks(HASH_LENGTH) {
        node = if index & 1 == 0 {
            hash_node(&node, sibling)
        } else {
            hash_node(sibling, &node)
        };
        index >>= 1;
    }

    if index != 0 {
        return Err(Error::IndexNotExhausted(index));
    }

    Ok(node)
}
