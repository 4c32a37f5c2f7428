//! Authentication: credential claims, remote verification, and the session
//! lifecycle state machine.
//!
//! This module provides:
//! - `Claims`: offline decode of a bearer credential's self-asserted claims
//! - `TokenVerifier` / `HttpVerifier`: server-side acceptance check
//! - `SessionManager`: the owned state machine tying storage, decode, and
//!   verification together, with automatic logout at credential expiry
//!
//! The credential itself is opaque to everything outside this module; the
//! navigation layer only ever sees a [`SessionState`].

pub mod claims;
pub mod error;
pub mod session;
pub mod verifier;

pub use claims::Claims;
pub use error::AuthError;
pub use session::{SessionManager, SessionState, CREDENTIAL_KEY};
pub use verifier::{HttpVerifier, TokenVerifier, Verification};
