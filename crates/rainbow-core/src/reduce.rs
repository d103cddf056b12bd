//! Reduction: deterministic digest -> seed compression, salted by round (component C).
//!
//! The fold over whole words uses XOR; the tail over leftover bytes uses a
//! wrapping add. This asymmetry is part of the on-disk contract, not a bug —
//! changing it would make every existing table unreadable.

use crate::hash::Seed;

/// Width in bytes of a [`Seed`].
const WORD: usize = 4;

/// `reduce(digest, digest_len, round) -> Seed`.
///
/// `digest` must have at least `digest_len` bytes; only the first
/// `digest_len` are read.
#[must_use]
pub fn reduce(digest: &[u8], digest_len: usize, round: u32) -> Seed {
    debug_assert!(digest.len() >= digest_len);
    let digest = &digest[..digest_len];

    let mut acc: u32 = 0;
    let whole_words = digest_len / WORD;
    for w in 0..whole_words {
        let start = w * WORD;
        let word = u32::from_le_bytes([
            digest[start],
            digest[start + 1],
            digest[start + 2],
            digest[start + 3],
        ]);
        acc ^= word;
    }

    let tail = digest_len % WORD;
    for i in 0..tail {
        let byte = digest[digest_len - 1 - i];
        acc = acc.wrapping_add(u32::from(byte));
    }

    acc ^ round
}
