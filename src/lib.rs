//! wayfarer-core - core library for the wayfarer travel-tracking client.
//!
//! Users record places they have traveled to or want to travel to, behind a
//! token-based login. This crate owns everything below the screens:
//!
//! - [`auth`]: credential decoding, remote verification, and the session
//!   lifecycle state machine with automatic logout at expiry
//! - [`storage`]: durable key-value persistence for the credential and
//!   small cached values
//! - [`api`]: REST client for the auth and places endpoints
//! - [`models`]: wire types
//! - [`config`]: environment-driven configuration
//!
//! The UI layer constructs a [`auth::SessionManager`] at startup, calls
//! `initialize()`, and renders the authenticated or unauthenticated
//! screen-set based on the state it observes.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod storage;

pub use api::{ApiClient, ApiError, Geocoder};
pub use auth::{AuthError, Claims, HttpVerifier, SessionManager, SessionState, TokenVerifier, Verification};
pub use config::Config;
pub use models::{Category, Coordinates, Place, PlaceDraft};
pub use storage::{FileStore, KeyValueStore, KeyringStore, MemoryStore, Storage, StorageError};
