//! Append-only table file lifecycle (component F, write side).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use rainbow_core::{Chain, RainbowError, CHAIN_RECORD_SIZE};

/// A table file opened for sequential append.
///
/// Created empty by the Generator Pool orchestration and appended to
/// concurrently by worker threads under an external lock (see
/// `rainbow_engine::generator`, which owns the `Mutex<TableFile>`).
pub struct TableFile {
    file: File,
    path: PathBuf,
}

impl TableFile {
    /// Create a new, empty table file at `path`, truncating any existing
    /// file with the same name.
    pub fn create_empty(path: impl AsRef<Path>) -> Result<Self, RainbowError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| RainbowError::io("create", e))?;
        Ok(Self { file, path })
    }

    /// Append `chains` to the file as raw 8-byte records in host byte order.
    ///
    /// A short write is treated as a failure: partial records would corrupt
    /// the `file_size == chain_num * 8` invariant.
    pub fn append(&mut self, chains: &[Chain]) -> Result<(), RainbowError> {
        if chains.is_empty() {
            return Ok(());
        }
        // SAFETY: `Chain` is `#[repr(C)]` with two `u32` fields (8 bytes, no
        // padding, alignment 4); reinterpreting the slice as bytes is sound
        // and preserves host byte order, which is the documented on-disk
        // format.
        let bytes = unsafe {
            std::slice::from_raw_parts(
                chains.as_ptr().cast::<u8>(),
                chains.len() * CHAIN_RECORD_SIZE,
            )
        };
        self.file
            .write_all(bytes)
            .map_err(|e| RainbowError::io("write", e))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_produces_expected_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.1.1.0.rt");
        let mut table = TableFile::create_empty(&path).unwrap();
        let chains = vec![Chain::new(1, 2), Chain::new(3, 4)];
        table.append(&chains).unwrap();
        drop(table);

        let metadata = std::fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), 16);
    }

    #[test]
    fn create_empty_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.1.1.0.rt");
        {
            let mut table = TableFile::create_empty(&path).unwrap();
            table.append(&[Chain::new(1, 2)]).unwrap();
        }
        {
            let _table = TableFile::create_empty(&path).unwrap();
        }
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }
}
