//! Encode/decode table parameters into/out of filenames (component J).

use crate::chain::TableParams;
use crate::error::RainbowError;

/// `format!("{hash_name}.{chain_num}.{chain_len}.{index}.rt")`.
///
/// Names may contain any bytes except `.`; this function does not escape
/// them, matching the distilled contract — callers choose hash names that
/// don't contain `.`.
#[must_use]
pub fn encode_table_name(params: &TableParams) -> String {
    format!(
        "{}.{}.{}.{}.rt",
        params.hash_name, params.chain_num, params.chain_len, params.index
    )
}

/// Decoded table name, deliberately omitting `index` — the Lookup Engine
/// never needs it (see SPEC_FULL.md §4.J).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTableName {
    pub hash_name: String,
    pub chain_num: u64,
    pub chain_len: u64,
}

/// Parse a table's basename into `(hash_name, chain_num, chain_len)`.
///
/// Fails with [`RainbowError::BadTableName`] on any deviation: wrong field
/// count, a non-numeric `chain_num`/`chain_len`/`index`, or a wrong
/// extension.
pub fn decode_table_name(basename: &str) -> Result<DecodedTableName, RainbowError> {
    let bad = || RainbowError::BadTableName(basename.to_string());

    let parts: Vec<&str> = basename.split('.').collect();
    let [hash_name, chain_num, chain_len, index, ext] = parts.as_slice() else {
        return Err(bad());
    };
    if hash_name.is_empty() || *ext != "rt" {
        return Err(bad());
    }
    let chain_num: u64 = chain_num.parse().map_err(|_| bad())?;
    let chain_len: u64 = chain_len.parse().map_err(|_| bad())?;
    let _index: u64 = index.parse().map_err(|_| bad())?;

    Ok(DecodedTableName {
        hash_name: (*hash_name).to_string(),
        chain_num,
        chain_len,
    })
}
