//! The single authoritative holder of a connection's lifecycle state.

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use super::{ConnectionState, Transition};
use crate::error::InvalidTransition;

/// Lifecycle state guarded by one lock.
///
/// Every transition is a check-and-set under the lock, so concurrent
/// `connect()`/`dispose()` calls are serialised: one wins, the other sees
/// the new state and is rejected (or no-ops, for a repeated dispose).
#[derive(Debug)]
pub struct ConnectionStateMachine {
    state: Mutex<ConnectionState>,
    changes: watch::Sender<ConnectionState>,
}

impl Default for ConnectionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionStateMachine {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            state: Mutex::new(ConnectionState::Disconnected),
            changes,
        }
    }

    /// Current state.
    pub fn current(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Receiver that observes every committed transition.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.changes.subscribe()
    }

    /// Run `f` against the current state while holding the lock.
    ///
    /// No transition can commit until `f` returns.
    pub fn with_state<R>(&self, f: impl FnOnce(ConnectionState) -> R) -> R {
        let state = self.state.lock();
        f(*state)
    }

    /// Attempt a transition; on failure the state is unchanged.
    pub fn apply(&self, transition: Transition) -> Result<ConnectionState, InvalidTransition> {
        let mut state = self.state.lock();
        let from = *state;
        let to = transition
            .target(from)
            .ok_or(InvalidTransition { from, transition })?;

        *state = to;
        self.changes.send_replace(to);
        debug!(from = %from, to = %to, transition = %transition, "connection state changed");
        Ok(to)
    }

    pub fn connect(&self) -> Result<ConnectionState, InvalidTransition> {
        self.apply(Transition::Connect)
    }

    pub fn established(&self) -> Result<ConnectionState, InvalidTransition> {
        self.apply(Transition::Established)
    }

    pub fn disconnect(&self) -> Result<ConnectionState, InvalidTransition> {
        self.apply(Transition::Disconnect)
    }

    pub fn closed(&self) -> Result<ConnectionState, InvalidTransition> {
        self.apply(Transition::Closed)
    }

    /// Begin disposal.
    ///
    /// Returns `true` when this call moved the machine to `Disposing`, and
    /// `false` when disposal was already underway or finished.
    pub fn dispose(&self) -> bool {
        let mut state = self.state.lock();
        if state.is_disposed() {
            return false;
        }

        let from = *state;
        *state = ConnectionState::Disposing;
        self.changes.send_replace(ConnectionState::Disposing);
        debug!(from = %from, "connection disposing");
        true
    }

    pub fn cleanup_done(&self) -> Result<ConnectionState, InvalidTransition> {
        self.apply(Transition::CleanupDone)
    }
}
