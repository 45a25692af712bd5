//! Persistent key-value storage.
//!
//! The cart and contact fields are mirrored into a string-keyed store that
//! survives reloads. [`KeyValueStore`] is the raw interface; backends are
//! [`MemoryStore`] and [`FileStore`]. [`PersistedState`] layers typed
//! per-field access on top of any backend.
//!
//! Storage failures (quota exceeded, storage disabled, I/O) are surfaced as
//! [`StorageError`] and propagated to the caller unchanged.

mod file;
mod memory;
mod persisted;

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use persisted::{PersistedState, StorageKey, format_cart_total};

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("Storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded for storage.
    #[error("Encode error for {key}: {message}")]
    Encode { key: String, message: String },

    /// Writing the key would exceed the store's byte quota.
    #[error("Quota exceeded writing {key} (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },

    /// Storage is turned off (e.g., private browsing).
    #[error("Storage is disabled")]
    Disabled,
}

/// A string-keyed, string-valued persistent store.
pub trait KeyValueStore {
    /// Read a value. Absent keys are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is rejected or fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Bytes used by all entries (keys plus values).
fn used_bytes(entries: &BTreeMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

/// Reject a write that would push the store past `quota` bytes.
fn check_quota(
    entries: &BTreeMap<String, String>,
    quota: Option<usize>,
    key: &str,
    value: &str,
) -> Result<(), StorageError> {
    let Some(limit) = quota else {
        return Ok(());
    };

    let replaced = entries.get(key).map_or(0, |old| key.len() + old.len());
    let after = used_bytes(entries) - replaced + key.len() + value.len();
    if after > limit {
        return Err(StorageError::QuotaExceeded {
            key: key.to_owned(),
            limit,
        });
    }
    Ok(())
}
