//! Built-in hash functions and the dynamic plug-in loader.

pub mod dynamic;
pub mod md5;
pub mod wikihash;

use std::sync::Arc;

use rainbow_core::HashRegistry;

pub use dynamic::{load_plugins, PluginEvent};
pub use md5::{Md5Hash, MD5_DIGEST_LEN};
pub use wikihash::{wikihash, WikiHash, WIKIHASH_DIGEST_LEN};

/// Register the static tier: `wikihash` and `md5`, in that order, so a
/// dynamic plug-in can never shadow either under the same name.
pub fn register_builtins(registry: &mut HashRegistry) {
    registry.register("wikihash", Arc::new(WikiHash));
    registry.register("md5", Arc::new(Md5Hash));
}

/// A registry populated with the static tier only (no filesystem scan).
#[must_use]
pub fn builtin_registry() -> HashRegistry {
    let mut registry = HashRegistry::new();
    register_builtins(&mut registry);
    registry
}
