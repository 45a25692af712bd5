//! JSON-file backed store.
//!
//! The whole map lives in memory and is rewritten to disk after every
//! mutation, which mirrors how browser local storage behaves from the page's
//! point of view: each write is durable before the call returns.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError, check_quota};

/// A [`KeyValueStore`] persisted as a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// and its parent directories are created on the first write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be read and
    /// [`StorageError::Corrupt`] if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened file store");
        Ok(Self {
            path,
            entries,
            quota: None,
        })
    }

    /// Limit the store to `bytes` of keys plus values.
    #[must_use]
    pub const fn with_quota(mut self, bytes: Option<usize>) -> Self {
        self.quota = bytes;
        self
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full map through a temp file and rename it into place.
    fn flush(&self) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let raw = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            StorageError::Encode {
                key: self.path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(&self.entries, self.quota, key, value)?;
        let previous = self.entries.insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.flush() {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => self.entries.insert(key.to_owned(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush() {
            self.entries.insert(key.to_owned(), previous);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("storage.json")).unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("userEmail", "a@b.c").unwrap();
        store.set("userZip", "78701").unwrap();
        store.remove("userZip").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("userEmail").unwrap().as_deref(), Some("a@b.c"));
        assert_eq!(reopened.get("userZip").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ nope").unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_quota_is_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("storage.json"))
            .unwrap()
            .with_quota(Some(4));

        assert!(matches!(
            store.set("cart", "{}"),
            Err(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(store.get("cart").unwrap(), None);
    }
}
