use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The credential string could not be decoded into its claims
    #[error("Malformed credential: {0}")]
    MalformedToken(String),

    /// Persisting or clearing the credential failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
