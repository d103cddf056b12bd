//! Built-in `wikihash`: a Mersenne-Twister-based 32-bit digest.
//!
//! Emulates a seeded PRNG whose first output word is treated as the digest.
//! The state-fill loop deliberately stops `200` words short of a full
//! reseed (`MT_INIT_WORDS = MT_N - 200`) — an attack-specific optimisation
//! preserved exactly per SPEC_FULL.md §9, not "completed" to a textbook
//! full Mersenne Twister initialisation. Changing this constant would
//! silently desynchronize every table generated against the old one.

use rainbow_core::hash::{HashFunction, Scratch, Seed};

const MT_N: usize = 624;
const MT_M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Preserved exactly: stops 200 words short of a full `MT_N`-word reseed.
const MT_INIT_WORDS: usize = MT_N - 200;

/// Digest length produced by `wikihash`: one tempered 32-bit output word.
pub const WIKIHASH_DIGEST_LEN: usize = 4;

fn mt_init(seed: u32) -> [u32; MT_N] {
    let mut mt = [0u32; MT_N];
    mt[0] = seed;
    for i in 1..MT_INIT_WORDS {
        mt[i] = 1_812_433_253u32
            .wrapping_mul(mt[i - 1] ^ (mt[i - 1] >> 30))
            .wrapping_add(i as u32);
    }
    mt
}

fn mt_twist_and_temper_first(mt: &mut [u32; MT_N]) -> u32 {
    for i in 0..MT_N {
        let y = (mt[i] & UPPER_MASK) | (mt[(i + 1) % MT_N] & LOWER_MASK);
        let mut next = mt[(i + MT_M) % MT_N] ^ (y >> 1);
        if y & 1 != 0 {
            next ^= MATRIX_A;
        }
        mt[i] = next;
    }

    let mut y = mt[0];
    y ^= y >> 11;
    y ^= (y << 7) & 0x9d2c_5680;
    y ^= (y << 15) & 0xefc6_0000;
    y ^= y >> 18;
    y
}

/// Compute the `wikihash` digest of `seed`.
#[must_use]
pub fn wikihash(seed: Seed) -> [u8; WIKIHASH_DIGEST_LEN] {
    let mut mt = mt_init(seed);
    let word = mt_twist_and_temper_first(&mut mt);
    word.to_le_bytes()
}

/// [`HashFunction`] adapter for `wikihash`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WikiHash;

impl HashFunction for WikiHash {
    fn digest_len(&self) -> usize {
        WIKIHASH_DIGEST_LEN
    }

    fn hash<'a>(&self, seed: Seed, scratch: &'a mut Scratch) -> &'a [u8] {
        scratch[..WIKIHASH_DIGEST_LEN].copy_from_slice(&wikihash(seed));
        &scratch[..WIKIHASH_DIGEST_LEN]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(wikihash(42), wikihash(42));
    }

    #[test]
    fn differs_across_seeds() {
        assert_ne!(wikihash(1), wikihash(2));
    }

    #[test]
    fn digest_len_is_four() {
        assert_eq!(WikiHash.digest_len(), 4);
    }

    #[test]
    fn hash_fn_matches_free_function() {
        let mut scratch = [0u8; rainbow_core::hash::MAX_DIGEST_LEN];
        let out = WikiHash.hash(7, &mut scratch);
        assert_eq!(out, wikihash(7));
    }
}
