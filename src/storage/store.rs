use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use super::StorageError;

/// A durable key-value backend holding raw string values.
///
/// Backends are single-writer: the crate assumes one in-process owner per
/// key and provides no cross-call ordering for concurrent writers.
pub trait KeyValueStore: Send + Sync {
    /// Write a value under a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read the value stored under a key, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Delete a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists.
    fn has(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Typed JSON layer over a [`KeyValueStore`] backend.
///
/// Values are serialized with `serde_json` on the way in and deserialized on
/// the way out. A value that fails to deserialize is treated as absent
/// rather than an error: a corrupt stored credential must not take down
/// startup, it just reads as "no session".
///
/// Clone is cheap - the backend is shared behind an `Arc`.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Serialize `value` and write it under `key`.
    ///
    /// If this fails the caller must not assume the write is durable.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let contents = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &contents)
    }

    /// Load and deserialize the value under `key`.
    ///
    /// Returns `None` when the key is absent or the stored data no longer
    /// parses as a `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(contents) = self.backend.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = %key, error = %e, "Stored value is corrupt, treating as absent");
                Ok(None)
            }
        }
    }

    /// Remove the value under `key`. Idempotent.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }

    /// Check whether `key` holds a value.
    pub fn has(&self, key: &str) -> Result<bool, StorageError> {
        self.backend.has(key)
    }
}
