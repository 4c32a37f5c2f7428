//! Data models for the travel-tracking API.
//!
//! - `Place`, `PlaceDraft`, `Category`: the recorded-places entity and its
//!   two lists (traveled / want-to-travel)
//! - `Coordinates`: resolved map position from the geocoder
//! - Auth payloads: `LoginRequest`, `RegisterRequest`, `LoginResponse`

pub mod place;
pub mod user;

pub use place::{Category, Coordinates, Place, PlaceDraft};
pub use user::{LoginRequest, LoginResponse, RegisterRequest};
