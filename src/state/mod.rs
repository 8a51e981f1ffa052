//! Connection lifecycle.
//!
//! ```text
//! Disconnected --connect--> Connecting --established--> Connected
//!      ^                        |                           |
//!      |                   disconnect                  disconnect
//!      |                        v                           v
//!      +---------closed------ Disconnecting <---------------+
//!
//! any non-terminal --dispose--> Disposing --cleanup_done--> Disposed
//! ```

mod machine;

use std::fmt;

pub use machine::ConnectionStateMachine;

/// Lifecycle state of one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Disconnected,
    Disconnecting,
    Connected,
    Connecting,
    Disposing,
    /// Terminal.
    Disposed,
}

impl ConnectionState {
    /// Whether inbound lines are still decoded in this state.
    pub fn accepts_inbound(self) -> bool {
        matches!(
            self,
            Self::Connecting | Self::Connected | Self::Disconnecting
        )
    }

    /// Whether chat commands may be sent.
    pub fn accepts_chat(self) -> bool {
        self == Self::Connected
    }

    /// Whether handshake and keepalive lines may be sent.
    pub fn accepts_protocol(self) -> bool {
        matches!(self, Self::Connecting | Self::Connected)
    }

    /// Whether the state is `Disposing` or `Disposed`.
    pub fn is_disposed(self) -> bool {
        matches!(self, Self::Disposing | Self::Disposed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Disconnecting => "disconnecting",
            Self::Connected => "connected",
            Self::Connecting => "connecting",
            Self::Disposing => "disposing",
            Self::Disposed => "disposed",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Connect,
    Established,
    Disconnect,
    Closed,
    Dispose,
    CleanupDone,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Established => "establish",
            Self::Disconnect => "disconnect",
            Self::Closed => "close",
            Self::Dispose => "dispose",
            Self::CleanupDone => "finish cleanup",
        }
    }

    /// Target state when `self` is legal from `from`.
    ///
    /// `None` means the transition is rejected. `Dispose` from
    /// `Disposing`/`Disposed` is handled by the machine as a no-op and is
    /// not listed here.
    pub fn target(self, from: ConnectionState) -> Option<ConnectionState> {
        use ConnectionState::*;

        match (self, from) {
            (Self::Connect, Disconnected) => Some(Connecting),
            (Self::Established, Connecting) => Some(Connected),
            (Self::Disconnect, Connecting | Connected) => Some(Disconnecting),
            (Self::Closed, Disconnecting) => Some(Disconnected),
            (Self::Dispose, Disconnected | Disconnecting | Connected | Connecting) => {
                Some(Disposing)
            }
            (Self::CleanupDone, Disposing) => Some(Disposed),
            _ => None,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
