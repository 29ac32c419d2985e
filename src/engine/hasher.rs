//! Block key hashing.
//!
//! The seen-set and the occurrence registry key on a SHA-256 digest of the
//! block's normalized key instead of the key string itself, so a run over
//! hundreds of thousands of lines holds one 64-byte digest per distinct
//! block rather than a second copy of every block body.

use sha2::{Digest, Sha256};

/// Hashes normalized block keys for deduplication identity.
///
/// The input is hashed verbatim: boundary trimming already happened in
/// [`Block::normalized_key`](crate::Block::normalized_key), and no further
/// normalization (case folding, whitespace collapsing) is applied, because
/// whitespace inside a block is significant for equality.
///
/// # Example
///
/// ```rust
/// use confdedup::engine::BlockHasher;
///
/// let digest = BlockHasher::digest("controller a\n bind x\n!");
/// assert_eq!(digest.len(), 64);
/// ```
pub struct BlockHasher;

impl BlockHasher {
    /// Computes the lowercase hex SHA-256 digest of a normalized key.
    #[must_use]
    pub fn digest(normalized_key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(normalized_key.as_bytes());
        hex::encode(hasher.finalize())
    }
}
