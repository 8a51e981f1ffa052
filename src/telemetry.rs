//! Telemetry utilities.

/// Standardized span constructors for session observability.
pub mod spans {
    use tracing::{Span, debug_span, info_span};

    /// Span covering one session (login name).
    pub fn session(nick: &str) -> Span {
        info_span!("session", nick = %nick)
    }

    /// Span covering the decode of one line.
    pub fn dispatch(command: &str) -> Span {
        debug_span!("dispatch", command = %command)
    }

    /// Span covering one outbound line.
    pub fn send(kind: &'static str, channel: Option<&str>) -> Span {
        if let Some(channel) = channel {
            debug_span!("send", kind, channel = %channel)
        } else {
            debug_span!("send", kind)
        }
    }
}
