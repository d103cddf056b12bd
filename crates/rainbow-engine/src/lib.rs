//! Chain walking, parallel generation, lookup, and exhaustive search.

pub mod exhaustive;
pub mod generator;
pub mod lookup;
pub mod prng;
pub mod walker;

pub use exhaustive::{partition_ranges, search, search_ranges, SeedRange};
pub use generator::generate;
pub use lookup::{lookup, LookupResult};
pub use walker::{regenerate, walk};
