//! In-memory store, used by tests and as a scratch backend.

use std::collections::BTreeMap;

use super::{KeyValueStore, StorageError, check_quota};

/// A [`KeyValueStore`] held entirely in memory.
///
/// Can be given a byte quota or switched off to reproduce the failure modes
/// of browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStore {
    /// Create an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store limited to `bytes` of keys plus values.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Turn every operation into [`StorageError::Disabled`] (or back).
    pub const fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        check_quota(&self.entries, self.quota, key, value)?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);

        store.remove("a").unwrap();
        assert!(store.is_empty());
        store.remove("a").unwrap();
    }

    #[test]
    fn test_quota_rejects_write_and_keeps_old_value() {
        let mut store = MemoryStore::with_quota(8);
        store.set("key", "abc").unwrap();

        let err = store.set("key", "abcdef").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 8, .. }));
        assert_eq!(store.get("key").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_disabled_store_fails_everything() {
        let mut store = MemoryStore::new();
        store.set_disabled(true);
        assert!(matches!(store.get("a"), Err(StorageError::Disabled)));
        assert!(matches!(store.set("a", "1"), Err(StorageError::Disabled)));
        assert!(matches!(store.remove("a"), Err(StorageError::Disabled)));
    }
}
