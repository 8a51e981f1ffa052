//! Command classification.
//!
//! Maps a command token onto the closed [`MessageKind`] set. Lookup never
//! fails: tokens outside both tables classify as [`MessageKind::Unknown`].

use std::fmt;

use crate::response::Response;

/// Kind of an incoming line, derived from its command token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    /// `JOIN`
    Join,
    /// `PART`
    Part,
    /// `MODE`
    Mode,
    /// `PRIVMSG`
    PrivMsg,
    /// `WHISPER`
    Whisper,
    /// `NOTICE`
    Notice,
    /// `USERNOTICE`
    UserNotice,
    /// `ROOMSTATE`
    RoomState,
    /// `USERSTATE`
    UserState,
    /// `GLOBALUSERSTATE`
    GlobalUserState,
    /// `CLEARCHAT`
    ClearChat,
    /// `CLEARMSG`
    ClearMsg,
    /// `HOSTTARGET`
    HostTarget,
    /// `RECONNECT`
    Reconnect,
    /// `PING`
    Ping,
    /// `PONG`
    Pong,
    /// `CAP`
    Cap,
    /// A known 3-digit reply.
    Numeric(Response),
    /// Anything else.
    Unknown,
}

/// Named command table.
const NAMED: &[(&str, MessageKind)] = &[
    ("PRIVMSG", MessageKind::PrivMsg),
    ("JOIN", MessageKind::Join),
    ("PART", MessageKind::Part),
    ("MODE", MessageKind::Mode),
    ("WHISPER", MessageKind::Whisper),
    ("NOTICE", MessageKind::Notice),
    ("USERNOTICE", MessageKind::UserNotice),
    ("ROOMSTATE", MessageKind::RoomState),
    ("USERSTATE", MessageKind::UserState),
    ("GLOBALUSERSTATE", MessageKind::GlobalUserState),
    ("CLEARCHAT", MessageKind::ClearChat),
    ("CLEARMSG", MessageKind::ClearMsg),
    ("HOSTTARGET", MessageKind::HostTarget),
    ("RECONNECT", MessageKind::Reconnect),
    ("PING", MessageKind::Ping),
    ("PONG", MessageKind::Pong),
    ("CAP", MessageKind::Cap),
];

impl MessageKind {
    /// Classify a command token.
    ///
    /// Exactly three ASCII digits are looked up in the numeric table; any
    /// other token in the named table (ASCII case-insensitive).
    pub fn classify(command: &str) -> MessageKind {
        if command.len() == 3 && command.bytes().all(|b| b.is_ascii_digit()) {
            return command
                .parse::<Response>()
                .map_or(MessageKind::Unknown, MessageKind::Numeric);
        }

        NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(command))
            .map_or(MessageKind::Unknown, |(_, kind)| *kind)
    }

    /// Canonical command token for this kind (`"353"` for numerics,
    /// `"UNKNOWN"` for the fallback).
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Join => "JOIN",
            MessageKind::Part => "PART",
            MessageKind::Mode => "MODE",
            MessageKind::PrivMsg => "PRIVMSG",
            MessageKind::Whisper => "WHISPER",
            MessageKind::Notice => "NOTICE",
            MessageKind::UserNotice => "USERNOTICE",
            MessageKind::RoomState => "ROOMSTATE",
            MessageKind::UserState => "USERSTATE",
            MessageKind::GlobalUserState => "GLOBALUSERSTATE",
            MessageKind::ClearChat => "CLEARCHAT",
            MessageKind::ClearMsg => "CLEARMSG",
            MessageKind::HostTarget => "HOSTTARGET",
            MessageKind::Reconnect => "RECONNECT",
            MessageKind::Ping => "PING",
            MessageKind::Pong => "PONG",
            MessageKind::Cap => "CAP",
            MessageKind::Numeric(response) => numeric_token(*response),
            MessageKind::Unknown => "UNKNOWN",
        }
    }
}

fn numeric_token(response: Response) -> &'static str {
    match response {
        Response::RPL_WELCOME => "001",
        Response::RPL_YOURHOST => "002",
        Response::RPL_CREATED => "003",
        Response::RPL_MYINFO => "004",
        Response::RPL_NAMREPLY => "353",
        Response::RPL_ENDOFNAMES => "366",
        Response::RPL_MOTD => "372",
        Response::RPL_MOTDSTART => "375",
        Response::RPL_ENDOFMOTD => "376",
        Response::ERR_UNKNOWNCOMMAND => "421",
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_commands() {
        assert_eq!(MessageKind::classify("JOIN"), MessageKind::Join);
        assert_eq!(MessageKind::classify("USERNOTICE"), MessageKind::UserNotice);
        assert_eq!(MessageKind::classify("ROOMSTATE"), MessageKind::RoomState);
        assert_eq!(MessageKind::classify("privmsg"), MessageKind::PrivMsg);
    }

    #[test]
    fn test_numeric_commands() {
        assert_eq!(
            MessageKind::classify("353"),
            MessageKind::Numeric(Response::RPL_NAMREPLY)
        );
        assert_eq!(
            MessageKind::classify("421"),
            MessageKind::Numeric(Response::ERR_UNKNOWNCOMMAND)
        );
    }

    #[test]
    fn test_unknown_is_fallback() {
        assert_eq!(MessageKind::classify("999"), MessageKind::Unknown);
        assert_eq!(MessageKind::classify("FROBNICATE"), MessageKind::Unknown);
        assert_eq!(MessageKind::classify("35"), MessageKind::Unknown);
        assert_eq!(MessageKind::classify(""), MessageKind::Unknown);
    }

    #[test]
    fn test_as_str_reclassifies() {
        for (name, kind) in NAMED {
            assert_eq!(kind.as_str(), *name);
            assert_eq!(MessageKind::classify(kind.as_str()), *kind);
        }
        let numeric = MessageKind::Numeric(Response::RPL_ENDOFMOTD);
        assert_eq!(MessageKind::classify(numeric.as_str()), numeric);
    }
}
