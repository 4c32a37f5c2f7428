//! Session lifecycle management: one owned state machine per process.
//!
//! The manager owns the authenticated/unauthenticated state, derives it from
//! the stored credential on startup, and tears the session down on explicit
//! logout, local expiry, or remote rejection. Consumers (the navigation
//! layer) observe state through a watch channel and call [`SessionManager::logout`];
//! they never touch the credential directly.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::storage::Storage;

use super::{AuthError, Claims, TokenVerifier, Verification};

/// Storage key holding the raw bearer credential
pub const CREDENTIAL_KEY: &str = "token";

/// Session state as seen by the navigation layer.
///
/// `Unknown` only exists between construction and the completion of the
/// startup check; after that the machine cycles between `Unauthenticated`
/// and `Authenticated` for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unknown,
    Unauthenticated,
    Authenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

/// Mutable state guarded by the transition lock.
///
/// The generation counter makes timer cancellation mandatory-effective: a
/// timer task that was superseded but still reaches the lock compares its
/// generation and becomes a no-op.
struct Transitions {
    timer: Option<JoinHandle<()>>,
    timer_generation: u64,
}

struct Core {
    storage: Storage,
    verifier: Arc<dyn TokenVerifier>,
    state_tx: watch::Sender<SessionState>,
    /// Serializes every transition-producing entry point. Held across the
    /// storage I/O and the remote verification call, so concurrent entry
    /// points queue instead of interleaving.
    transitions: Mutex<Transitions>,
}

impl Core {
    fn set_state(&self, state: SessionState) {
        let previous = self.state_tx.send_replace(state);
        if previous != state {
            debug!(from = ?previous, to = ?state, "Session state transition");
        }
    }

    /// Best-effort credential removal for the fail-closed paths.
    ///
    /// A removal failure is logged but never blocks the transition to
    /// `Unauthenticated`: startup must degrade, not error.
    fn discard_credential(&self) {
        if let Err(e) = self.storage.remove(CREDENTIAL_KEY) {
            warn!(error = %e, "Failed to remove credential from storage");
        }
    }

    /// Cancel any armed expiry timer. Called before every new timer is
    /// armed, so a stale timer can never outlive the session that created
    /// it.
    fn cancel_timer(transitions: &mut Transitions) {
        transitions.timer_generation += 1;
        if let Some(handle) = transitions.timer.take() {
            handle.abort();
        }
    }

    /// Arm a one-shot timer that performs the expiry transition.
    ///
    /// The task holds only a weak reference: once every manager handle is
    /// dropped the timer silently dies with the core.
    fn arm_timer(core: &Arc<Core>, transitions: &mut Transitions, delay: Duration) {
        Self::cancel_timer(transitions);
        let generation = transitions.timer_generation;
        let core: Weak<Core> = Arc::downgrade(core);

        debug!(delay_secs = delay.as_secs(), "Arming session expiry timer");
        transitions.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(core) = core.upgrade() {
                core.expire(generation).await;
            }
        }));
    }

    /// Expiry transition, fired by the timer.
    async fn expire(self: Arc<Self>, generation: u64) {
        let mut transitions = self.transitions.lock().await;
        if transitions.timer_generation != generation {
            // Canceled or superseded while we waited for the lock
            return;
        }
        transitions.timer = None;

        info!("Credential expired, ending session");
        self.discard_credential();
        self.set_state(SessionState::Unauthenticated);
    }
}

/// The session lifecycle state machine.
///
/// Clone is cheap - handles share one core. All entry points serialize on an
/// internal lock, so a `logout()` issued while `initialize()` is mid-flight
/// queues behind it and then wins, rather than interleaving with it.
///
/// Invariant, after every completed transition: the state is `Authenticated`
/// if and only if the store holds a credential.
#[derive(Clone)]
pub struct SessionManager {
    core: Arc<Core>,
}

impl SessionManager {
    pub fn new(storage: Storage, verifier: Arc<dyn TokenVerifier>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Unknown);
        Self {
            core: Arc::new(Core {
                storage,
                verifier,
                state_tx,
                transitions: Mutex::new(Transitions {
                    timer: None,
                    timer_generation: 0,
                }),
            }),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        *self.core.state_tx.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// Subscribe to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.core.state_tx.subscribe()
    }

    /// Startup check: derive session state from the stored credential.
    ///
    /// Every failure path - unreadable storage, undecodable credential,
    /// local expiry, remote rejection, unreachable authority - degrades to
    /// `Unauthenticated` without surfacing an error; an invalid session is
    /// indistinguishable from never having logged in. Only a stored,
    /// unexpired credential that the authority accepts yields
    /// `Authenticated`, with a one-shot timer armed for the remaining
    /// lifetime.
    pub async fn initialize(&self) -> SessionState {
        let core = &self.core;
        let mut transitions = core.transitions.lock().await;

        let token: Option<String> = match core.storage.load(CREDENTIAL_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read stored credential, treating as absent");
                None
            }
        };
        let Some(token) = token else {
            info!("No stored credential, starting unauthenticated");
            core.set_state(SessionState::Unauthenticated);
            return SessionState::Unauthenticated;
        };

        let claims = match Claims::decode(&token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "Stored credential is undecodable, discarding");
                core.discard_credential();
                core.set_state(SessionState::Unauthenticated);
                return SessionState::Unauthenticated;
            }
        };

        if claims.is_expired() {
            info!(user = %claims.sub, "Stored credential already expired, discarding");
            core.discard_credential();
            core.set_state(SessionState::Unauthenticated);
            return SessionState::Unauthenticated;
        }

        match core.verifier.verify(&token).await {
            Verification::Accepted => {
                info!(user = %claims.sub, "Credential verified, session restored");
                core.set_state(SessionState::Authenticated);
                let delay = claims.time_until_expiry().to_std().unwrap_or(Duration::ZERO);
                Core::arm_timer(core, &mut transitions, delay);
                SessionState::Authenticated
            }
            Verification::Rejected(reason) => {
                warn!(reason = %reason, "Authority rejected stored credential, discarding");
                core.discard_credential();
                core.set_state(SessionState::Unauthenticated);
                SessionState::Unauthenticated
            }
        }
    }

    /// Record a freshly issued credential and open a session.
    ///
    /// The credential was just handed out by the authority, so a decode
    /// failure is unexpected; it fails this login attempt without touching
    /// the current state. A storage failure is surfaced so the caller can
    /// tell the user the login succeeded on the server but did not persist.
    pub async fn login(&self, token: &str) -> Result<(), AuthError> {
        let core = &self.core;
        let mut transitions = core.transitions.lock().await;

        let claims = Claims::decode(token)?;
        core.storage.save(CREDENTIAL_KEY, &token)?;

        Core::cancel_timer(&mut transitions);
        core.set_state(SessionState::Authenticated);
        let delay = claims.time_until_expiry().to_std().unwrap_or(Duration::ZERO);
        Core::arm_timer(core, &mut transitions, delay);

        info!(user = %claims.sub, "Login successful");
        Ok(())
    }

    /// End the session: clear the credential, cancel the expiry timer, and
    /// flip to `Unauthenticated`. Idempotent - a second call is a no-op.
    ///
    /// A storage failure is surfaced and leaves the session untouched, so
    /// state and storage never disagree.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let core = &self.core;
        let mut transitions = core.transitions.lock().await;

        core.storage.remove(CREDENTIAL_KEY)?;
        Core::cancel_timer(&mut transitions);
        core.set_state(SessionState::Unauthenticated);

        info!("Logged out");
        Ok(())
    }
}
