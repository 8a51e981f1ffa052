//! Server replies, keepalives and the fallback payloads.

use tmi_proto::Response;

/// Text addressed to us by the server (welcome and MOTD lines).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerText {
    pub target: String,
    pub text: String,
}

/// A known numeric without a dedicated payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerReply {
    pub code: Response,
    pub target: String,
    /// Parameters after the target.
    pub params: Vec<String>,
    pub text: String,
}

/// 421: the server did not understand something we sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownCommand {
    pub command: String,
    pub text: String,
}

/// PING or PONG token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keepalive {
    pub token: String,
}

/// CAP reply (`ACK`, `NAK`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capability {
    pub subcommand: String,
    pub capabilities: Vec<String>,
}

impl Capability {
    pub fn is_ack(&self) -> bool {
        self.subcommand.eq_ignore_ascii_case("ACK")
    }
}

/// Anything the classifier did not recognise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unknown {
    pub command: String,
    pub text: String,
}
