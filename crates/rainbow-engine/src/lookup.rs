//! Lookup Engine: recover a seed from a digest using a sorted table
//! (component H).

use rainbow_core::{reduce, Chain, HashFunction, Scratch, Seed};
use rainbow_store::binary_search_first;

use crate::walker::regenerate;

/// Outcome of a table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupResult {
    Found(Seed),
    NotFound,
}

/// Search `table` (sorted by `.end`, see [`rainbow_store::sort_by_end`]) for
/// the seed that produces `target_digest` under `hash`, assuming it appears
/// somewhere within a chain of length `chain_len`.
///
/// Tries every possible position `j` of the target within an unknown chain,
/// walking forward from a reconstructed digest at that position to the
/// chain's endpoint, then checks the sorted table for a chain ending there.
#[must_use]
pub fn lookup(
    table: &[Chain],
    chain_len: u64,
    hash: &dyn HashFunction,
    target_digest: &[u8],
) -> LookupResult {
    if chain_len == 0 {
        return LookupResult::NotFound;
    }
    let digest_len = hash.digest_len();
    let mut scratch: Scratch = [0u8; 64];

    for j in (0..chain_len).rev() {
        let mut tmp_digest: &[u8] = target_digest;
        let mut owned: Vec<u8> = Vec::new();

        for i in j..chain_len.saturating_sub(1) {
            let r = reduce(tmp_digest, digest_len, i as u32);
            owned = hash.hash(r, &mut scratch).to_vec();
            tmp_digest = &owned;
        }
        let endpoint = reduce(tmp_digest, digest_len, (chain_len - 1) as u32);

        if let Some(mut idx) = binary_search_first(table, endpoint) {
            while idx < table.len() && table[idx].end == endpoint {
                if let Some(seed) = regenerate(table[idx].start, chain_len, hash, target_digest) {
                    return LookupResult::Found(seed);
                }
                idx += 1;
            }
        }
    }

    LookupResult::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use rainbow_hashes::WikiHash;

    #[test]
    fn round_trip_generate_then_lookup() {
        let hash = WikiHash;
        let chain_len = 30u64;
        let mut table: Vec<Chain> = Vec::new();

        for start in 0u32..200 {
            let end = crate::walker::walk(start, chain_len, &hash);
            table.push(Chain::new(start, end));
        }
        rainbow_store::sort_by_end(&mut table);

        for start in [0u32, 57, 123, 199] {
            let mut scratch: Scratch = [0u8; 64];
            let digest = hash.hash(start, &mut scratch).to_vec();
            let result = lookup(&table, chain_len, &hash, &digest);
            assert_eq!(result, LookupResult::Found(start));
        }
    }

    #[test]
    fn digest_never_produced_is_not_found() {
        let hash = WikiHash;
        let chain_len = 10u64;
        let mut table: Vec<Chain> = Vec::new();
        for start in 0u32..20 {
            let end = crate::walker::walk(start, chain_len, &hash);
            table.push(Chain::new(start, end));
        }
        rainbow_store::sort_by_end(&mut table);

        let bogus = [0xffu8; 4];
        assert_eq!(
            lookup(&table, chain_len, &hash, &bogus),
            LookupResult::NotFound
        );
    }

    #[test]
    fn false_positive_endpoint_match_is_rejected() {
        // Build two chains by hand so their endpoints collide, but only one
        // of them actually produces the target digest anywhere along its
        // walk. Using chain_len = 1 makes the walk trivial: end = reduce(hash(start), 0).
        let hash = WikiHash;
        let chain_len = 1u64;

        let real_start = 42u32;
        let mut scratch: Scratch = [0u8; 64];
        let target_digest = hash.hash(real_start, &mut scratch).to_vec();

        let real_end = crate::walker::walk(real_start, chain_len, &hash);

        // Find some other start whose endpoint collides with real_end but
        // whose own hash differs from the target (a manufactured false
        // positive), by brute search over a small range.
        let mut collider = None;
        for candidate in 0u32..5000 {
            if candidate == real_start {
                continue;
            }
            let end = crate::walker::walk(candidate, chain_len, &hash);
            if end == real_end {
                let mut s = [0u8; 64];
                let d = hash.hash(candidate, &mut s);
                if d != target_digest.as_slice() {
                    collider = Some(candidate);
                    break;
                }
            }
        }

        let Some(collider) = collider else {
            // No collision found in range; nothing to assert, but this
            // should not happen for wikihash's 4-byte digest space.
            return;
        };

        let mut table = vec![Chain::new(collider, real_end), Chain::new(real_start, real_end)];
        rainbow_store::sort_by_end(&mut table);

        let result = lookup(&table, chain_len, &hash, &target_digest);
        assert_eq!(result, LookupResult::Found(real_start));
    }
}
