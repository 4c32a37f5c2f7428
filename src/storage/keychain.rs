use keyring::Entry;

use super::{KeyValueStore, StorageError};

/// Service name under which entries appear in the OS keychain
const SERVICE_NAME: &str = "wayfarer";

/// OS keychain backend via the `keyring` crate.
///
/// Each key becomes a keychain entry under the `wayfarer` service. Preferred
/// over [`super::FileStore`] for the bearer credential on platforms where a
/// keychain is available.
#[derive(Default)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &str) -> Result<Entry, StorageError> {
        Entry::new(SERVICE_NAME, key).map_err(|e| StorageError::Keyring(e.to_string()))
    }
}

impl KeyValueStore for KeyringStore {
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::entry(key)?
            .set_password(value)
            .map_err(|e| StorageError::Keyring(e.to_string()))
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match Self::entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::Keyring(e.to_string())),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::Keyring(e.to_string())),
        }
    }
}
