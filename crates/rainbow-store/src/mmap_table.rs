//! Memory-mapped table views (component F, read/sort side).

use std::fs::OpenOptions;
use std::path::Path;

use memmap2::{Mmap, MmapMut};
use rainbow_core::{Chain, RainbowError, CHAIN_RECORD_SIZE};

/// A read-only, memory-mapped view of a table file, for the Lookup Engine.
pub struct ReadTable {
    mmap: Mmap,
}

impl ReadTable {
    /// Open `path` read-only and map the entire file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RainbowError> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|e| RainbowError::io("open", e))?;
        // SAFETY: the mapped file is not concurrently truncated by this
        // process; the Lookup Engine only ever opens tables that have
        // finished generation and sorting.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| RainbowError::io("mmap", e))?;
        Ok(Self { mmap })
    }

    /// Reinterpret the mapped bytes as an array of [`Chain`] records.
    #[must_use]
    pub fn as_chains(&self) -> &[Chain] {
        bytes_as_chains(&self.mmap)
    }
}

/// A read-write, memory-mapped view of a table file, for the Sorter.
pub struct WriteTable {
    mmap: MmapMut,
}

impl WriteTable {
    /// Open `path` read-write and map the entire file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RainbowError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| RainbowError::io("open", e))?;
        // SAFETY: exclusive access is assumed here — the sorter runs after
        // all generator workers have joined (SPEC_FULL.md §5).
        let mmap = unsafe { MmapMut::map_mut(&file) }.map_err(|e| RainbowError::io("mmap", e))?;
        Ok(Self { mmap })
    }

    /// Reinterpret the mapped bytes as a mutable array of [`Chain`] records.
    #[must_use]
    pub fn as_chains_mut(&mut self) -> &mut [Chain] {
        bytes_as_chains_mut(&mut self.mmap)
    }

    /// Force a synchronous flush of dirty pages to disk. Not required for
    /// correctness — the mapping is shared and the OS flushes on drop — but
    /// useful when a caller wants a synchronous guarantee before closing.
    pub fn flush(&self) -> Result<(), RainbowError> {
        self.mmap.flush().map_err(|e| RainbowError::io("write", e))
    }
}

fn bytes_as_chains(bytes: &[u8]) -> &[Chain] {
    let len = bytes.len() / CHAIN_RECORD_SIZE;
    // SAFETY: `Chain` has alignment 4 and no padding; mmap regions are
    // page-aligned (far stricter than 4), and `len` only covers whole
    // records, so this reinterpretation never reads past `bytes`.
    unsafe { std::slice::from_raw_parts(bytes.as_ptr().cast::<Chain>(), len) }
}

fn bytes_as_chains_mut(bytes: &mut [u8]) -> &mut [Chain] {
    let len = bytes.len() / CHAIN_RECORD_SIZE;
    // SAFETY: see `bytes_as_chains`; exclusive access is guaranteed by the
    // `&mut` borrow of the backing `MmapMut`.
    unsafe { std::slice::from_raw_parts_mut(bytes.as_mut_ptr().cast::<Chain>(), len) }
}
