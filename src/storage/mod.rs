//! Durable key-value persistence for the credential and small cached values.
//!
//! This module provides:
//! - `KeyValueStore`: the backend trait, with file, in-memory, and OS
//!   keychain implementations
//! - `Storage`: a typed JSON layer used by the session manager
//!
//! Backends hold raw strings; `Storage` adds serde on top and treats corrupt
//! stored data as absent so a bad credential cannot crash startup.

pub mod error;
pub mod file;
pub mod keychain;
pub mod memory;
pub mod store;

pub use error::StorageError;
pub use file::FileStore;
pub use keychain::KeyringStore;
pub use memory::MemoryStore;
pub use store::{KeyValueStore, Storage};
