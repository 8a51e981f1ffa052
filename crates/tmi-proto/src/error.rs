//! Error types for the protocol crate.
//!
//! This module defines error types for line-level protocol failures,
//! tokenizer failures, and outgoing chat-command validation.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Extract the command token from raw line bytes (for error reporting).
///
/// Works without validating UTF-8, so a hint is still available when the
/// line itself could not be decoded. The command is the first space-delimited
/// token after the optional tag segment (`@...`) and prefix (`:...`).
pub(crate) fn extract_command_hint(raw_line: &[u8]) -> Option<String> {
    let mut pos = 0;

    for marker in [b'@', b':'] {
        if raw_line.get(pos) == Some(&marker) {
            while pos < raw_line.len() && raw_line[pos] != b' ' {
                pos += 1;
            }
            while raw_line.get(pos) == Some(&b' ') {
                pos += 1;
            }
        }
    }

    let start = pos;
    while pos < raw_line.len() && raw_line[pos].is_ascii_alphanumeric() {
        pos += 1;
    }

    if pos > start {
        String::from_utf8(raw_line[start..pos].to_vec()).ok()
    } else {
        None
    }
}

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error while framing lines.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 bytes in a line.
    #[error("invalid UTF-8 in line at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// The raw line as received.
        raw_line: Vec<u8>,
        /// Byte position where UTF-8 validation failed.
        byte_pos: usize,
        /// Decoder message.
        details: String,
        /// Command token recovered from the raw bytes, if any.
        command_hint: Option<String>,
    },

    /// Line exceeded the configured maximum length.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Actual line length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Illegal control character in a line.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),

    /// The tokenizer could not establish minimal line structure.
    #[error("invalid message: {string:?}")]
    InvalidMessage {
        /// The rejected line.
        string: String,
        /// The underlying tokenizer error.
        #[source]
        cause: MessageParseError,
    },
}

impl ProtocolError {
    /// Whether this error means one line was malformed, as opposed to an
    /// I/O failure. Decoding can carry on after a malformed line.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ProtocolError::InvalidMessage { .. }
                | ProtocolError::InvalidUtf8 { .. }
                | ProtocolError::IllegalControlChar(_)
                | ProtocolError::MessageTooLong { .. }
        )
    }
}

/// Errors raised by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty or only whitespace.
    #[error("empty message")]
    EmptyMessage,

    /// The tag segment was not followed by anything.
    #[error("unterminated tags section")]
    UnterminatedTags,

    /// The prefix was not followed by a command.
    #[error("unterminated origin/prefix")]
    UnterminatedOrigin,

    /// No command token could be read.
    #[error("missing command")]
    MissingCommand,

    /// Parsing failed with position context.
    #[error("parsing failed at position {position}: {context}")]
    ParseContext {
        /// Character position where parsing failed.
        position: usize,
        /// What was being parsed.
        context: String,
    },
}

/// Rejection of an outgoing chat command.
///
/// Every variant names the argument at fault so the caller can point at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CommandFormatError {
    /// A required argument was not supplied.
    #[error("/{command}: missing required argument <{argument}>")]
    MissingArgument {
        /// Command name, without the slash.
        command: String,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// More arguments were supplied than the grammar accepts.
    #[error("/{command}: expected at most {max} arguments, got {got}")]
    TooManyArguments {
        /// Command name, without the slash.
        command: String,
        /// Maximum accepted argument count.
        max: usize,
        /// Number supplied.
        got: usize,
    },

    /// An argument was present but not acceptable.
    #[error("/{command}: invalid <{argument}> {value:?}: {reason}")]
    InvalidArgument {
        /// Command name, without the slash.
        command: String,
        /// Name of the rejected argument.
        argument: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: ValueError,
    },

    /// A free-form command name that could never be sent.
    #[error("invalid command name {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

impl CommandFormatError {
    /// Name of the argument at fault, if the error concerns one argument.
    pub fn argument(&self) -> Option<&'static str> {
        match self {
            CommandFormatError::MissingArgument { argument, .. }
            | CommandFormatError::InvalidArgument { argument, .. } => Some(argument),
            CommandFormatError::TooManyArguments { .. }
            | CommandFormatError::InvalidName { .. } => None,
        }
    }
}

/// Failure to construct a validated value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValueError {
    /// Value was empty.
    #[error("value is empty")]
    Empty,

    /// Value contained a character outside the allowed set.
    #[error("illegal character {0:?}")]
    IllegalChar(char),

    /// Value was too long.
    #[error("longer than {0} characters")]
    TooLong(usize),

    /// Numeric value outside its bounds.
    #[error("out of range ({min}..={max})")]
    OutOfRange {
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },

    /// Value could not be read as a number or duration.
    #[error("not a number")]
    NotANumber,

    /// Colour outside the palette available to the caller.
    #[error("not in the allowed colour palette")]
    UnknownColor,

    /// Value not in a fixed set of choices.
    #[error("expected one of {0}")]
    NotAChoice(&'static str),
}
