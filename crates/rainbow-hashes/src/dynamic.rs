//! Dynamic hash plug-in loader (component A, second tier).
//!
//! Scans a directory for files named `hashlib<N>.<DLL_EXTENSION>` for
//! `N in [0, 10)`, `dlopen`s each one found, and `dlsym`s a symbol named
//! `hashFuncArray`: a C array of [`RawHashEntry`] terminated by a sentinel
//! with a null `name`. Missing files and missing symbols are silently
//! skipped — a plug-in tier is optional by contract, not an error — but are
//! still reported back to the caller so the orchestration layer can log
//! them at `warn` rather than drop the information entirely.

use std::ffi::{c_char, c_void, CStr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rainbow_core::hash::{HashFunction, Scratch, Seed, MAX_DIGEST_LEN};
use rainbow_core::RainbowError;

/// Raw C layout a plug-in's `hashFuncArray` symbol must match.
#[repr(C)]
struct RawHashEntry {
    name: *const c_char,
    func: Option<unsafe extern "C" fn(u32, *mut u8) -> *mut u8>,
    digest_len: u32,
}

/// Outcome of scanning one candidate plug-in path.
#[derive(Debug)]
pub enum PluginEvent {
    /// The file did not exist; skipped silently, no library touched.
    NotFound { path: PathBuf },
    /// The file opened but had no `hashFuncArray` symbol; skipped.
    SymbolMissing { path: PathBuf },
    /// One or more hash functions were loaded from this file.
    Loaded { path: PathBuf, names: Vec<String> },
}

/// Adapter exposing a plug-in's raw `extern "C"` function as a safe
/// [`HashFunction`]. Holds the owning `dlopen` handle for its lifetime so
/// the library is never unloaded while still in use.
struct DynamicHashFunction {
    func: unsafe extern "C" fn(u32, *mut u8) -> *mut u8,
    digest_len: usize,
    // Keeps the shared object mapped for as long as this adapter exists.
    _handle: Arc<DlHandle>,
}

// SAFETY: the plug-in contract requires `func` to be pure and reentrant
// (no mutable shared state), so calling it from any thread is sound.
unsafe impl Send for DynamicHashFunction {}
unsafe impl Sync for DynamicHashFunction {}

impl HashFunction for DynamicHashFunction {
    fn digest_len(&self) -> usize {
        self.digest_len
    }

    fn hash<'a>(&self, seed: Seed, scratch: &'a mut Scratch) -> &'a [u8] {
        // SAFETY: `scratch` is a valid, writable `MAX_DIGEST_LEN`-byte buffer
        // and `self.digest_len <= MAX_DIGEST_LEN` is enforced at load time.
        // The contract requires the function to write `digest_len` bytes
        // into the buffer we pass and return a pointer to them (normally the
        // same pointer).
        unsafe {
            (self.func)(seed, scratch.as_mut_ptr());
        }
        &scratch[..self.digest_len]
    }
}

struct DlHandle(*mut c_void);

// SAFETY: a `dlopen` handle may be used from any thread; the loader never
// calls `dlclose` while adapters referencing it are alive (see `_handle`).
unsafe impl Send for DlHandle {}
unsafe impl Sync for DlHandle {}

impl Drop for DlHandle {
    fn drop(&mut self) {
        unsafe {
            libc::dlclose(self.0);
        }
    }
}

/// Scan `dir` for `hashlib0.<ext> .. hashlib9.<ext>` and register any hash
/// functions found into `registry`. Returns one [`PluginEvent`] per
/// candidate path considered (`NotFound` for paths that don't exist), never
/// an error by itself — a missing plug-in directory is not fatal.
pub fn load_plugins(
    dir: &Path,
    registry: &mut rainbow_core::HashRegistry,
) -> Result<Vec<PluginEvent>, RainbowError> {
    let ext = std::env::consts::DLL_EXTENSION;
    let mut events = Vec::new();

    for n in 0..10 {
        let path = dir.join(format!("hashlib{n}.{ext}"));
        if !path.exists() {
            events.push(PluginEvent::NotFound { path });
            continue;
        }

        match load_one(&path) {
            Some(entries) => {
                let mut names = Vec::with_capacity(entries.len());
                for (name, func) in entries {
                    names.push(name.clone());
                    registry.register(name, func);
                }
                events.push(PluginEvent::Loaded { path, names });
            }
            None => events.push(PluginEvent::SymbolMissing { path }),
        }
    }

    Ok(events)
}

fn load_one(path: &Path) -> Option<Vec<(String, Arc<dyn HashFunction>)>> {
    let c_path = std::ffi::CString::new(path.to_string_lossy().as_bytes()).ok()?;

    // SAFETY: `c_path` is a valid, NUL-terminated C string for the duration
    // of this call.
    let raw_handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW) };
    if raw_handle.is_null() {
        return None;
    }
    let handle = Arc::new(DlHandle(raw_handle));

    let symbol = std::ffi::CString::new("hashFuncArray").expect("no interior NUL");
    // SAFETY: `handle.0` is a live handle returned by a successful `dlopen`
    // above; `symbol` is NUL-terminated.
    let sym = unsafe { libc::dlsym(handle.0, symbol.as_ptr()) };
    if sym.is_null() {
        return None;
    }

    let mut out = Vec::new();
    let mut cursor = sym.cast::<RawHashEntry>();
    loop {
        // SAFETY: the plug-in contract guarantees the array is terminated by
        // a sentinel with a null `name`; we stop at the first one and never
        // read past it.
        let entry = unsafe { &*cursor };
        if entry.name.is_null() {
            break;
        }
        let Some(func) = entry.func else { break };
        let name = unsafe { CStr::from_ptr(entry.name) }
            .to_string_lossy()
            .into_owned();
        let digest_len = entry.digest_len as usize;
        if digest_len == 0 || digest_len > MAX_DIGEST_LEN {
            // Malformed entry; skip it but keep scanning the rest of the array.
            cursor = unsafe { cursor.add(1) };
            continue;
        }

        out.push((
            name,
            Arc::new(DynamicHashFunction {
                func,
                digest_len,
                _handle: Arc::clone(&handle),
            }) as Arc<dyn HashFunction>,
        ));
        cursor = unsafe { cursor.add(1) };
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_are_reported_not_errored() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = rainbow_core::HashRegistry::new();
        let events = load_plugins(dir.path(), &mut registry).unwrap();
        assert_eq!(events.len(), 10);
        assert!(events
            .iter()
            .all(|e| matches!(e, PluginEvent::NotFound { .. })));
        assert!(registry.is_empty());
    }
}
