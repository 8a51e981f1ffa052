//! Line source (`:tmi.twitch.tv` or `:nick!user@host`).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Origin of a line.
///
/// Chat users always appear as `login!login@login.tmi.twitch.tv`; the server
/// itself as `tmi.twitch.tv`. Parsing is lenient: components are not
/// validated, and a bare name is a server only when it contains a dot
/// (`jtv` is a user).
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prefix {
    /// Server host name.
    Server(String),
    /// User mask. Missing parts are empty.
    User {
        /// Nickname (the login on this service).
        nick: String,
        /// Username after `!`.
        user: String,
        /// Host after `@`.
        host: String,
    },
}

impl Prefix {
    /// Split a raw prefix (colon already stripped).
    pub fn new_from_str(s: &str) -> Self {
        let (mask, host) = match s.split_once('@') {
            Some((mask, host)) => (mask, host),
            None => (s, ""),
        };
        let (nick, user) = mask.split_once('!').unwrap_or((mask, ""));

        if host.is_empty() && user.is_empty() && !mask.contains('!') && nick.contains('.') {
            return Prefix::Server(nick.to_owned());
        }
        Prefix::User {
            nick: nick.to_owned(),
            user: user.to_owned(),
            host: host.to_owned(),
        }
    }

    /// User mask from its parts.
    ///
    /// ```
    /// use tmi_proto::Prefix;
    ///
    /// let prefix = Prefix::new("ada", "ada", "ada.tmi.twitch.tv");
    /// assert_eq!(prefix.nick(), Some("ada"));
    /// assert_eq!(prefix.to_string(), "ada!ada@ada.tmi.twitch.tv");
    /// ```
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::User {
            nick: nick.into(),
            user: user.into(),
            host: host.into(),
        }
    }

    /// Nickname of a user mask; `None` for a server or an empty nick.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Prefix::User { nick, .. } if !nick.is_empty() => Some(nick),
            _ => None,
        }
    }

    /// Username of a user mask, if present.
    pub fn user(&self) -> Option<&str> {
        match self {
            Prefix::User { user, .. } if !user.is_empty() => Some(user),
            _ => None,
        }
    }

    /// Host part of a user mask, or the server name.
    pub fn host(&self) -> Option<&str> {
        match self {
            Prefix::Server(name) => Some(name),
            Prefix::User { host, .. } if !host.is_empty() => Some(host),
            Prefix::User { .. } => None,
        }
    }

    /// Whether the line came from the server.
    pub fn is_server(&self) -> bool {
        matches!(self, Prefix::Server(_))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (nick, user, host) = match self {
            Prefix::Server(name) => return f.write_str(name),
            Prefix::User { nick, user, host } => (nick, user, host),
        };
        f.write_str(nick)?;
        if !user.is_empty() {
            write!(f, "!{user}")?;
        }
        if !host.is_empty() {
            write!(f, "@{host}")?;
        }
        Ok(())
    }
}

impl FromStr for Prefix {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Prefix::new_from_str(s))
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Prefix::new_from_str(s)
    }
}
