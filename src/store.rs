//! JSON file backend for `columns::Storage`.
//!
//! DESIGN
//! ======
//! Mirrors `localStorage`: one flat `key -> string` map, held in memory and
//! written back whole after every change. Writes go to a temp file in the
//! same directory and are renamed into place, so a crash never leaves a
//! half-written store.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use columns::{Storage, StoreError};
use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("cannot read store {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("store {path} is not a JSON object of strings: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FileStoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| FileStoreError::Parse { path: path.clone(), source })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "store file missing; starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(FileStoreError::Read { path, source }),
        };
        Ok(Self { path, entries: RefCell::new(entries) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the map, write it, then keep it.
    fn commit(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StoreError> {
        let mut next = self.entries.borrow().clone();
        change(&mut next);
        let raw = serde_json::to_string_pretty(&next).map_err(|e| StoreError::Backend(e.to_string()))?;
        write_atomic(&self.path, raw.as_bytes()).map_err(|e| StoreError::Backend(format!("{}: {e}", self.path.display())))?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.commit(|map| {
            map.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        if !self.entries.borrow().contains_key(key) {
            return Ok(());
        }
        self.commit(|map| {
            map.remove(key);
        })
    }
}

fn write_atomic(dest: &Path, bytes: &[u8]) -> io::Result<()> {
    // `Path::parent` is `Some("")` for a bare file name.
    let dir = dest.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}
