//! Chain walking and regeneration (component D).

use rainbow_core::{reduce, HashFunction, Scratch, Seed};

/// Walk a chain of `chain_len` reduction/hash steps starting from `start`
/// and return its endpoint.
pub fn walk(start: Seed, chain_len: u64, hash: &dyn HashFunction) -> Seed {
    let mut s = start;
    let mut scratch: Scratch = [0u8; 64];
    let digest_len = hash.digest_len();
    for i in 0..chain_len {
        let digest = hash.hash(s, &mut scratch);
        s = reduce(digest, digest_len, i as u32);
    }
    s
}

/// Re-walk a chain from `start`, checking at every step whether the raw hash
/// (before reduction) equals `target_digest`. Returns the seed that produced
/// the match, or `None` if the full walk completes without one (a false
/// positive at the calling layer — the endpoint matched but no step's hash
/// equals the target).
pub fn regenerate(
    start: Seed,
    chain_len: u64,
    hash: &dyn HashFunction,
    target_digest: &[u8],
) -> Option<Seed> {
    let mut s = start;
    let mut scratch: Scratch = [0u8; 64];
    let digest_len = hash.digest_len();
    for i in 0..chain_len {
        let digest = hash.hash(s, &mut scratch);
        if digest == target_digest {
            return Some(s);
        }
        s = reduce(digest, digest_len, i as u32);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rainbow_hashes::WikiHash;

    #[test]
    fn walk_is_deterministic() {
        let hash = WikiHash;
        let a = walk(12345, 100, &hash);
        let b = walk(12345, 100, &hash);
        assert_eq!(a, b);
    }

    #[test]
    fn regenerate_finds_seed_on_its_own_chain() {
        let hash = WikiHash;
        let start = 777u32;
        let chain_len = 50u64;

        let mut s = start;
        let mut scratch: Scratch = [0u8; 64];
        for i in 0..chain_len / 2 {
            let digest = hash.hash(s, &mut scratch);
            s = reduce(digest, hash.digest_len(), i as u32);
        }
        let target_seed = s;
        let mut target_scratch: Scratch = [0u8; 64];
        let target_digest = hash.hash(target_seed, &mut target_scratch).to_vec();

        let found = regenerate(start, chain_len, &hash, &target_digest);
        assert_eq!(found, Some(target_seed));
    }

    #[test]
    fn regenerate_returns_none_when_target_never_appears() {
        let hash = WikiHash;
        let bogus_digest = [0xffu8; 4];
        let found = regenerate(1, 10, &hash, &bogus_digest);
        assert_eq!(found, None);
    }
}
