//! Data model, hash-registry abstraction, reduction, and name codec shared by
//! every crate in the rainbow-table engine.

pub mod chain;
pub mod error;
pub mod hash;
pub mod name_codec;
pub mod reduce;

pub use chain::{Chain, TableParams, CHAIN_RECORD_SIZE};
pub use error::RainbowError;
pub use hash::{HashFunction, HashRegistry, Scratch, Seed, MAX_DIGEST_LEN};
pub use name_codec::{decode_table_name, encode_table_name, DecodedTableName};
pub use reduce::reduce;
