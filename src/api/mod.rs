//! REST client module for the travels backend.
//!
//! This module provides the `ApiClient` for the auth and places endpoints
//! and the `Geocoder` wrapper for address lookup. All authenticated calls
//! carry the bearer credential managed by [`crate::auth`].

pub mod client;
pub mod error;
pub mod geocode;

pub use client::ApiClient;
pub use error::ApiError;
pub use geocode::Geocoder;
