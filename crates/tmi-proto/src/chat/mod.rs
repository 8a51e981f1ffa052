//! Slash commands sent as chat text.
//!
//! Moderation and account actions travel as the body of a `PRIVMSG`
//! (`/timeout alice 600 spamming`). Each [`ChatCommand`] carries a fixed
//! usage grammar; [`ChatCommand::encode`] validates caller arguments against
//! it before anything is written.

mod encode;
pub mod values;

use std::fmt;

pub use self::encode::EncodeOptions;
pub use self::values::{ChatColor, ChatDuration, CommercialLength, Login, NamedColor};

use self::values::{DurationSpec, FOLLOWERS_DURATION, SLOW_DURATION, TIMEOUT_DURATION};

/// What an argument must look like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    /// A user or channel login.
    Login,
    /// A message id (from the `id` tag).
    MessageId,
    /// A bounded duration.
    Duration(DurationSpec),
    /// A name colour.
    Color,
    /// A commercial length.
    CommercialLength,
    /// Free text; absorbs every remaining argument.
    Text,
}

/// One slot of a usage grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArgSpec {
    /// Name used in usage lines and errors.
    pub name: &'static str,
    /// Accepted shape.
    pub kind: ArgKind,
    /// Whether the argument must be present.
    pub required: bool,
}

const fn req(name: &'static str, kind: ArgKind) -> ArgSpec {
    ArgSpec {
        name,
        kind,
        required: true,
    }
}

const fn opt(name: &'static str, kind: ArgKind) -> ArgSpec {
    ArgSpec {
        name,
        kind,
        required: false,
    }
}

const NONE: &[ArgSpec] = &[];
const USER: &[ArgSpec] = &[req("user", ArgKind::Login)];
const CHANNEL: &[ArgSpec] = &[req("channel", ArgKind::Login)];
const BAN: &[ArgSpec] = &[req("user", ArgKind::Login), opt("reason", ArgKind::Text)];
const TIMEOUT: &[ArgSpec] = &[
    req("user", ArgKind::Login),
    opt("duration", ArgKind::Duration(TIMEOUT_DURATION)),
    opt("reason", ArgKind::Text),
];
const COLOR: &[ArgSpec] = &[req("color", ArgKind::Color)];
const COMMERCIAL: &[ArgSpec] = &[opt("length", ArgKind::CommercialLength)];
const DELETE: &[ArgSpec] = &[req("msg-id", ArgKind::MessageId)];
const FOLLOWERS: &[ArgSpec] = &[opt("duration", ArgKind::Duration(FOLLOWERS_DURATION))];
const SLOW: &[ArgSpec] = &[opt("duration", ArgKind::Duration(SLOW_DURATION))];
const HELP: &[ArgSpec] = &[opt("command", ArgKind::Text)];
const MARKER: &[ArgSpec] = &[opt("description", ArgKind::Text)];
const ME: &[ArgSpec] = &[req("message", ArgKind::Text)];
const WHISPER: &[ArgSpec] = &[req("user", ArgKind::Login), req("message", ArgKind::Text)];
const OTHER: &[ArgSpec] = &[opt("args", ArgKind::Text)];

/// A chat slash command.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ChatCommand {
    /// `/ban <user> [reason]`
    Ban,
    /// `/unban <user>`
    Unban,
    /// `/timeout <user> [duration] [reason]`
    Timeout,
    /// `/untimeout <user>`
    Untimeout,
    /// `/clear`
    Clear,
    /// `/color <color>`
    Color,
    /// `/commercial [length]`
    Commercial,
    /// `/delete <msg-id>`
    Delete,
    /// `/disconnect`
    Disconnect,
    /// `/emoteonly`
    EmoteOnly,
    /// `/emoteonlyoff`
    EmoteOnlyOff,
    /// `/followers [duration]`
    Followers,
    /// `/followersoff`
    FollowersOff,
    /// `/help [command]`
    Help,
    /// `/host <channel>`
    Host,
    /// `/unhost`
    Unhost,
    /// `/marker [description]`
    Marker,
    /// `/me <message>`
    Me,
    /// `/mod <user>`
    Mod,
    /// `/unmod <user>`
    Unmod,
    /// `/mods`
    Mods,
    /// `/r9kbeta`
    R9kBeta,
    /// `/r9kbetaoff`
    R9kBetaOff,
    /// `/raid <channel>`
    Raid,
    /// `/unraid`
    Unraid,
    /// `/slow [duration]`
    Slow,
    /// `/slowoff`
    SlowOff,
    /// `/subscribers`
    Subscribers,
    /// `/subscribersoff`
    SubscribersOff,
    /// `/vip <user>`
    Vip,
    /// `/unvip <user>`
    Unvip,
    /// `/vips`
    Vips,
    /// `/w <user> <message>`
    Whisper,
    /// `/block <user>`
    Block,
    /// `/unblock <user>`
    Unblock,
    /// Any other slash command; arguments pass through as free text.
    Other(String),
}

/// Name and grammar of every fixed command.
const TABLE: &[(ChatCommand, &str, &[ArgSpec])] = &[
    (ChatCommand::Ban, "ban", BAN),
    (ChatCommand::Unban, "unban", USER),
    (ChatCommand::Timeout, "timeout", TIMEOUT),
    (ChatCommand::Untimeout, "untimeout", USER),
    (ChatCommand::Clear, "clear", NONE),
    (ChatCommand::Color, "color", COLOR),
    (ChatCommand::Commercial, "commercial", COMMERCIAL),
    (ChatCommand::Delete, "delete", DELETE),
    (ChatCommand::Disconnect, "disconnect", NONE),
    (ChatCommand::EmoteOnly, "emoteonly", NONE),
    (ChatCommand::EmoteOnlyOff, "emoteonlyoff", NONE),
    (ChatCommand::Followers, "followers", FOLLOWERS),
    (ChatCommand::FollowersOff, "followersoff", NONE),
    (ChatCommand::Help, "help", HELP),
    (ChatCommand::Host, "host", CHANNEL),
    (ChatCommand::Unhost, "unhost", NONE),
    (ChatCommand::Marker, "marker", MARKER),
    (ChatCommand::Me, "me", ME),
    (ChatCommand::Mod, "mod", USER),
    (ChatCommand::Unmod, "unmod", USER),
    (ChatCommand::Mods, "mods", NONE),
    (ChatCommand::R9kBeta, "r9kbeta", NONE),
    (ChatCommand::R9kBetaOff, "r9kbetaoff", NONE),
    (ChatCommand::Raid, "raid", CHANNEL),
    (ChatCommand::Unraid, "unraid", NONE),
    (ChatCommand::Slow, "slow", SLOW),
    (ChatCommand::SlowOff, "slowoff", NONE),
    (ChatCommand::Subscribers, "subscribers", NONE),
    (ChatCommand::SubscribersOff, "subscribersoff", NONE),
    (ChatCommand::Vip, "vip", USER),
    (ChatCommand::Unvip, "unvip", USER),
    (ChatCommand::Vips, "vips", NONE),
    (ChatCommand::Whisper, "w", WHISPER),
    (ChatCommand::Block, "block", USER),
    (ChatCommand::Unblock, "unblock", USER),
];

impl ChatCommand {
    /// Every fixed command (excludes [`ChatCommand::Other`]).
    pub fn all() -> impl Iterator<Item = &'static ChatCommand> {
        TABLE.iter().map(|(command, _, _)| command)
    }

    fn entry(&self) -> Option<&'static (ChatCommand, &'static str, &'static [ArgSpec])> {
        TABLE.iter().find(|(command, _, _)| command == self)
    }

    /// Command name without the slash.
    pub fn name(&self) -> &str {
        match self {
            ChatCommand::Other(name) => name,
            fixed => fixed.entry().map_or("", |(_, name, _)| name),
        }
    }

    /// Usage grammar of this command.
    pub fn grammar(&self) -> &'static [ArgSpec] {
        match self {
            ChatCommand::Other(_) => OTHER,
            fixed => fixed.entry().map_or(NONE, |(_, _, grammar)| grammar),
        }
    }

    /// Look up a command by name, with or without the leading slash.
    ///
    /// Unknown names become [`ChatCommand::Other`]; `None` only for names
    /// that could never be sent (empty or containing whitespace).
    pub fn from_name(name: &str) -> Option<ChatCommand> {
        let name = name.strip_prefix('/').unwrap_or(name);
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return None;
        }
        let command = TABLE
            .iter()
            .find(|(_, fixed, _)| fixed.eq_ignore_ascii_case(name))
            .map_or_else(
                || ChatCommand::Other(name.to_ascii_lowercase()),
                |(command, _, _)| command.clone(),
            );
        Some(command)
    }

    /// Render a usage line such as `/timeout <user> [duration] [reason]`.
    pub fn usage(&self) -> String {
        let mut line = format!("/{}", self.name());
        for arg in self.grammar() {
            if arg.required {
                line.push_str(&format!(" <{}>", arg.name));
            } else {
                line.push_str(&format!(" [{}]", arg.name));
            }
        }
        line
    }

    /// Smallest number of arguments the grammar accepts.
    pub fn min_args(&self) -> usize {
        self.grammar().iter().filter(|arg| arg.required).count()
    }

    /// Largest number of arguments, or `None` when trailing free text
    /// absorbs the rest.
    pub fn max_args(&self) -> Option<usize> {
        let grammar = self.grammar();
        match grammar.last() {
            Some(ArgSpec {
                kind: ArgKind::Text,
                ..
            }) => None,
            _ => Some(grammar.len()),
        }
    }
}

impl fmt::Display for ChatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = ChatCommand::all().map(|c| c.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ChatCommand::from_name("/timeout"), Some(ChatCommand::Timeout));
        assert_eq!(ChatCommand::from_name("W"), Some(ChatCommand::Whisper));
        assert_eq!(
            ChatCommand::from_name("/uniquechat"),
            Some(ChatCommand::Other("uniquechat".into()))
        );
        assert_eq!(ChatCommand::from_name("/"), None);
        assert_eq!(ChatCommand::from_name("time out"), None);
    }

    #[test]
    fn test_from_name_inverts_name() {
        for command in ChatCommand::all() {
            assert_eq!(ChatCommand::from_name(command.name()).as_ref(), Some(command));
        }
    }

    #[test]
    fn test_usage() {
        assert_eq!(ChatCommand::Timeout.usage(), "/timeout <user> [duration] [reason]");
        assert_eq!(ChatCommand::Whisper.usage(), "/w <user> <message>");
        assert_eq!(ChatCommand::Clear.usage(), "/clear");
    }

    #[test]
    fn test_arity() {
        assert_eq!(ChatCommand::Timeout.min_args(), 1);
        assert_eq!(ChatCommand::Timeout.max_args(), None);
        assert_eq!(ChatCommand::Color.min_args(), 1);
        assert_eq!(ChatCommand::Color.max_args(), Some(1));
        assert_eq!(ChatCommand::Mods.max_args(), Some(0));
    }
}
