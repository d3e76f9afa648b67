//! Content-derived commit identity.
//!
//! A commit id is the SHA-256 of its parent id, its message and the
//! repository sequence number at creation:
//!
//! ```text
//! sha256( parent_hex \0 message \0 sequence )
//! ```
//!
//! Root commits hash the all-zero [`CommitId::ROOT`] sentinel as their parent.
//! The sequence number keeps repeated identical messages on the same parent
//! from colliding.

use sha2::{Digest, Sha256};

use crate::graph::types::CommitId;

/// Compute the id of a commit.
///
/// Pure and deterministic: identical inputs always give the same id.
pub fn compute_id(message: &str, parent: Option<&CommitId>, sequence: u64) -> CommitId {
    let parent = parent.copied().unwrap_or(CommitId::ROOT);

    let mut hasher = Sha256::new();
    hasher.update(parent.to_hex().as_bytes());
    hasher.update(b"\0");
    hasher.update(message.as_bytes());
    hasher.update(b"\0");
    hasher.update(sequence.to_string().as_bytes());

    let mut bytes = [0u8; CommitId::LEN];
    bytes.copy_from_slice(&hasher.finalize());
    CommitId::from_bytes(bytes)
}
