//! Unified error handling for tmi-engine.
//!
//! Inbound problems (`MalformedMessage`, `IncompleteFields`) are reported
//! values and never end a connection. Lifecycle and send problems are
//! synchronous `Result` failures at the call site.

use std::sync::Arc;

use thiserror::Error;
use tmi_proto::{CommandFormatError, ProtocolError};

use crate::event::EventKind;
use crate::state::{ConnectionState, Transition};

// ============================================================================
// Inbound (dispatch) errors
// ============================================================================

/// A line the tokenizer could not give minimal structure to.
///
/// The line is dropped; the connection is unaffected.
#[derive(Debug, Clone, Error)]
#[error("malformed line {line:?}: {source}")]
pub struct MalformedMessage {
    /// The offending line, as received.
    pub line: String,
    /// Tokenizer diagnosis.
    #[source]
    pub source: Arc<ProtocolError>,
}

impl MalformedMessage {
    pub(crate) fn new(line: impl Into<String>, source: ProtocolError) -> Self {
        Self {
            line: line.into(),
            source: Arc::new(source),
        }
    }
}

/// Fields a decoder expected but did not find.
///
/// The event is still delivered, with those fields defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} line is missing {missing:?}")]
pub struct IncompleteFields {
    /// Kind of event that was built.
    pub kind: EventKind,
    /// Names of the defaulted fields, in decode order.
    pub missing: Vec<&'static str>,
}

// ============================================================================
// Lifecycle errors
// ============================================================================

/// A lifecycle operation that is not legal from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {transition} while {from}")]
pub struct InvalidTransition {
    /// State at the time of the call (unchanged).
    pub from: ConnectionState,
    /// The rejected transition.
    pub transition: Transition,
}

// ============================================================================
// Outbound errors
// ============================================================================

/// Errors that can occur while sending.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("cannot send while {0}")]
    NotConnected(ConnectionState),

    #[error(transparent)]
    Format(#[from] CommandFormatError),

    #[error("refusing to send line: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("transport failed: {0}")]
    Transport(#[from] std::io::Error),
}

impl SendError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotConnected(_) => "not_connected",
            Self::Format(_) => "command_format",
            Self::Protocol(_) => "protocol",
            Self::Transport(_) => "transport",
        }
    }
}

// ============================================================================
// Top-level error
// ============================================================================

/// Any failure surfaced by a [`Session`](crate::session::Session) call.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error(transparent)]
    Malformed(#[from] MalformedMessage),

    #[error("inbound stream failed: {0}")]
    Inbound(#[source] ProtocolError),
}

impl EngineError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transition(_) => "invalid_transition",
            Self::Send(e) => e.error_code(),
            Self::Malformed(_) => "malformed_message",
            Self::Inbound(_) => "inbound",
        }
    }
}

/// Result type for session operations.
pub type EngineResult<T> = Result<T, EngineError>;
