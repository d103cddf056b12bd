//! Built-in `md5`: hashes the 4 little-endian bytes of the seed.

use md5::{Digest, Md5};
use rainbow_core::hash::{HashFunction, Scratch, Seed};

/// Digest length produced by `md5`.
pub const MD5_DIGEST_LEN: usize = 16;

/// [`HashFunction`] adapter wrapping RustCrypto's `md-5` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Md5Hash;

impl HashFunction for Md5Hash {
    fn digest_len(&self) -> usize {
        MD5_DIGEST_LEN
    }

    fn hash<'a>(&self, seed: Seed, scratch: &'a mut Scratch) -> &'a [u8] {
        let mut hasher = Md5::new();
        hasher.update(seed.to_le_bytes());
        let digest = hasher.finalize();
        scratch[..MD5_DIGEST_LEN].copy_from_slice(&digest);
        &scratch[..MD5_DIGEST_LEN]
    }
}
