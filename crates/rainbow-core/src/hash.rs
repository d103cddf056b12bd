//! The pluggable hash-function abstraction (component A).
//!
//! The original plug-in contract passes a raw `(seed, scratch) -> scratch`
//! pointer pair to avoid allocating per call. We reproduce the no-allocation
//! property with a safe trait instead of a bare `fn` pointer: implementors
//! fill a caller-owned [`Scratch`] buffer and return a borrowed slice of it.

use std::sync::Arc;

use crate::error::RainbowError;

/// Canonical name for a 32-bit PRNG input.
pub type Seed = u32;

/// Upper bound on digest length accepted anywhere in the engine.
pub const MAX_DIGEST_LEN: usize = 64;

/// Caller-owned scratch buffer a [`HashFunction`] writes its digest into.
pub type Scratch = [u8; MAX_DIGEST_LEN];

/// A pure, reentrant map from seed to digest bytes.
///
/// Implementations must not hold mutable shared state: the same seed must
/// always produce the same digest, from any thread, at any time.
pub trait HashFunction: Send + Sync {
    /// Number of meaningful bytes this function writes into `scratch`.
    fn digest_len(&self) -> usize;

    /// Compute the digest of `seed`, writing into `scratch` and returning a
    /// slice over its first `digest_len()` bytes.
    fn hash<'a>(&self, seed: Seed, scratch: &'a mut Scratch) -> &'a [u8];
}

/// Process-wide mapping `name -> (fn, digest_len)`, assembled in discovery
/// order from one or more tiers (static built-ins first, dynamic plug-ins
/// after). Resolution returns the first match, so a later tier can never
/// shadow an earlier one under the same name.
#[derive(Default, Clone)]
pub struct HashRegistry {
    entries: Vec<(String, Arc<dyn HashFunction>)>,
}

impl HashRegistry {
    /// An empty registry. Callers typically populate it via
    /// `rainbow_hashes::register_builtins` followed by an optional
    /// `rainbow_hashes::dynamic::load_plugins`.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append an entry. Does not check for duplicate names: duplicates are
    /// permitted, and `resolve` always returns the first one registered.
    pub fn register(&mut self, name: impl Into<String>, func: Arc<dyn HashFunction>) {
        self.entries.push((name.into(), func));
    }

    /// Number of registered entries (including any duplicate names).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve `name` to its hash function, walking entries in registration
    /// order and returning the first match.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn HashFunction>, RainbowError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| Arc::clone(f))
            .ok_or_else(|| RainbowError::UnknownHash(name.to_string()))
    }

    /// Iterate registered `(name, digest_len)` pairs in discovery order.
    pub fn names(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f.digest_len()))
    }
}
