use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read '{key}' from storage")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{key}' to storage")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize value for '{key}'")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Keychain access failed: {0}")]
    Keyring(String),
}
