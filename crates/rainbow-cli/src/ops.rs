//! Orchestration entry points: `generate`, `search`, `crack`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rainbow_core::{decode_table_name, encode_table_name, HashFunction, RainbowError, Seed, TableParams};
use rainbow_engine::LookupResult;
use rainbow_store::{ReadTable, TableFile, WriteTable};

use crate::log::{LogEmitter, LogLevel};

/// Decode a 32-character lowercase hex digest into its 16-byte form.
///
/// Rejects (rather than silently truncating) any input whose length isn't
/// exactly 32 or that contains non-hex characters.
pub fn decode_hex_digest(hex: &str) -> Result<Vec<u8>, RainbowError> {
    if hex.len() != 32 {
        return Err(RainbowError::BadHexInput(format!(
            "expected 32 hex characters, got {}",
            hex.len()
        )));
    }
    let bytes = hex.as_bytes();
    let mut out = Vec::with_capacity(16);
    for pair in bytes.chunks(2) {
        let hi = hex_nibble(pair[0]).ok_or_else(|| RainbowError::BadHexInput(hex.to_string()))?;
        let lo = hex_nibble(pair[1]).ok_or_else(|| RainbowError::BadHexInput(hex.to_string()))?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Narrow a decoded digest down to the `digest_len` bytes the resolved hash
/// actually produces.
///
/// `decode_hex_digest` always yields 16 bytes, but `HashFunction::hash` may
/// return fewer (e.g. `wikihash`'s 4 bytes). Slice/Vec equality in the engine
/// layer requires matching lengths, so callers must truncate before handing
/// the digest off to `rainbow_engine::lookup`/`search`.
fn truncate_to_digest_len(digest: &[u8], digest_len: usize) -> Result<Vec<u8>, RainbowError> {
    if digest_len > digest.len() {
        return Err(RainbowError::BadHexInput(format!(
            "digest is {} bytes, hash needs {}",
            digest.len(),
            digest_len
        )));
    }
    Ok(digest[..digest_len].to_vec())
}

/// Resolve `hash_name` against the built-in registry plus any plug-ins found
/// in the configured plug-in directory.
fn resolve_hash(hash_name: &str) -> Result<Arc<dyn HashFunction>, RainbowError> {
    let mut registry = rainbow_hashes::builtin_registry();
    let events = rainbow_hashes::load_plugins(&crate::config::config().plugin_dir, &mut registry)?;
    for event in events {
        match event {
            rainbow_hashes::PluginEvent::Loaded { path, names } => {
                let mut emitter = LogEmitter::to_stdout("plugin-scan");
                let _ = emitter.emit_entry(
                    crate::log::LogEntry::new("plugin-scan", LogLevel::Info, "plugin_loaded")
                        .with_table_path(path.display().to_string())
                        .with_hash_name(names.join(",")),
                );
            }
            rainbow_hashes::PluginEvent::SymbolMissing { path } => {
                let mut emitter = LogEmitter::to_stdout("plugin-scan");
                let _ = emitter.emit_entry(
                    crate::log::LogEntry::new("plugin-scan", LogLevel::Warn, "plugin_load_failed")
                        .with_table_path(path.display().to_string()),
                );
            }
            rainbow_hashes::PluginEvent::NotFound { .. } => {}
        }
    }
    registry.resolve(hash_name)
}

/// Generate `table_count` tables of `chain_num` chains each (indices
/// `0..table_count`), sort each, and return the written paths.
pub fn generate(
    chain_num: u64,
    chain_len: u64,
    table_count: u64,
    hash_name: &str,
) -> Result<Vec<PathBuf>, RainbowError> {
    let hash = resolve_hash(hash_name)?;
    let mut emitter = LogEmitter::to_stdout("generate");
    let mut paths = Vec::with_capacity(table_count as usize);

    for index in 0..table_count {
        let params = TableParams {
            hash_name: hash_name.to_string(),
            chain_num,
            chain_len,
            index,
        };
        let path = PathBuf::from(encode_table_name(&params));

        let started = Instant::now();
        let _ = emitter.emit_entry(
            crate::log::LogEntry::new("generate", LogLevel::Info, "table_created")
                .with_hash_name(hash_name)
                .with_chain_params(chain_num, chain_len)
                .with_table_path(path.display().to_string()),
        );

        let table = TableFile::create_empty(&path)?;
        rainbow_engine::generate(table, chain_num, chain_len, Arc::clone(&hash))?;

        {
            let mut write = WriteTable::open(&path)?;
            rainbow_store::sort_by_end(write.as_chains_mut());
            write.flush()?;
        }

        let _ = emitter.emit_entry(
            crate::log::LogEntry::new("generate", LogLevel::Info, "table_sorted")
                .with_table_path(path.display().to_string())
                .with_duration_ms(started.elapsed().as_millis() as u64),
        );

        paths.push(path);
    }

    Ok(paths)
}

/// Look up the seed behind `target_hash_hex` in the table at `table_path`.
pub fn search(table_path: &std::path::Path, target_hash_hex: &str) -> Result<LookupResult, RainbowError> {
    let basename = table_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| RainbowError::BadTableName(table_path.display().to_string()))?;
    let decoded = decode_table_name(basename)?;
    let hash = resolve_hash(&decoded.hash_name)?;
    let target_digest = decode_hex_digest(target_hash_hex)?;
    let target_digest = truncate_to_digest_len(&target_digest, hash.digest_len())?;

    let mut emitter = LogEmitter::to_stdout("search");
    let started = Instant::now();
    let _ = emitter.emit_entry(
        crate::log::LogEntry::new("search", LogLevel::Info, "lookup_started")
            .with_hash_name(&decoded.hash_name)
            .with_table_path(table_path.display().to_string()),
    );

    let read = ReadTable::open(table_path)?;
    let result = rainbow_engine::lookup(
        read.as_chains(),
        decoded.chain_len,
        hash.as_ref(),
        &target_digest,
    );

    let mut entry = crate::log::LogEntry::new("search", LogLevel::Info, "lookup_result")
        .with_table_path(table_path.display().to_string())
        .with_duration_ms(started.elapsed().as_millis() as u64);
    if let LookupResult::Found(seed) = result {
        entry = entry.with_seed(seed);
    }
    let _ = emitter.emit_entry(entry);

    Ok(result)
}

/// Exhaustively search the full 32-bit seed space for `target_hash_hex`
/// under `hash_name`.
pub fn crack(hash_name: &str, target_hash_hex: &str) -> Result<Option<Seed>, RainbowError> {
    let hash = resolve_hash(hash_name)?;
    let target_digest = decode_hex_digest(target_hash_hex)?;
    let target_digest = truncate_to_digest_len(&target_digest, hash.digest_len())?;

    let mut emitter = LogEmitter::to_stdout("crack");
    let started = Instant::now();
    let _ = emitter.emit_entry(
        crate::log::LogEntry::new("crack", LogLevel::Info, "crack_started").with_hash_name(hash_name),
    );

    let result = rainbow_engine::search(hash, target_digest);

    let mut entry = crate::log::LogEntry::new("crack", LogLevel::Info, "crack_result")
        .with_hash_name(hash_name)
        .with_duration_ms(started.elapsed().as_millis() as u64);
    if let Some(seed) = result {
        entry = entry.with_seed(seed);
    }
    let _ = emitter.emit_entry(entry);

    Ok(result)
}
