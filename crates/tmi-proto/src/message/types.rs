use chrono::{DateTime, TimeZone, Utc};

use crate::chan::ChannelExt;
use crate::command::MessageKind;
use crate::prefix::Prefix;

use super::tags::Tags;

/// A tokenized protocol line.
///
/// Contains the tag map, the optional prefix/source, the command token and
/// its positional parameters. The trailing segment is kept apart from
/// `params` so "absent" and "present but empty" stay distinguishable.
///
/// # Example
///
/// ```
/// use tmi_proto::Message;
///
/// let msg: Message = "@color=#FF0000 :ada!ada@ada.tmi.twitch.tv PRIVMSG #ada :hello"
///     .parse()
///     .unwrap();
/// assert_eq!(msg.command, "PRIVMSG");
/// assert_eq!(msg.param(0), Some("#ada"));
/// assert_eq!(msg.trailing.as_deref(), Some("hello"));
/// assert_eq!(msg.tag("color"), Some("#FF0000"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Metadata tags. Empty when the line had no tag segment.
    pub tags: Tags,
    /// Message prefix/source (e.g., `nick!user@host` or `tmi.twitch.tv`).
    pub prefix: Option<Prefix>,
    /// Command token, case preserved (`PRIVMSG`, `353`, ...).
    pub command: String,
    /// Middle parameters, in order.
    pub params: Vec<String>,
    /// The colon-marked final parameter.
    pub trailing: Option<String>,
}

impl Message {
    /// Create a message with only a command token.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Message {
            tags: Tags::new(),
            prefix: None,
            command: command.into(),
            params: Vec::new(),
            trailing: None,
        }
    }

    /// Classify the command token.
    pub fn kind(&self) -> MessageKind {
        MessageKind::classify(&self.command)
    }

    /// Whether the command token is a 3-digit numeric reply.
    pub fn is_numeric(&self) -> bool {
        self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit())
    }

    /// Positional parameter by index. The trailing segment is not included.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Value of a tag, if present.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key)
    }

    /// Trailing text, or `""` when absent.
    pub fn text(&self) -> &str {
        self.trailing.as_deref().unwrap_or("")
    }

    /// Get the nickname from the message prefix, if present.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nick)
    }

    /// The channel this line targets, when its first parameter is a channel.
    pub fn channel(&self) -> Option<&str> {
        self.param(0).filter(|p| p.is_channel_name())
    }

    /// Server send time from the `tmi-sent-ts` tag (milliseconds since epoch).
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        let millis: i64 = self.tag("tmi-sent-ts")?.parse().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }

    /// Message id from the `id` tag.
    pub fn message_id(&self) -> Option<&str> {
        self.tags.get_non_empty("id")
    }

    /// Create a PRIVMSG to a target with text.
    #[must_use]
    pub fn privmsg<T, M>(target: T, text: M) -> Self
    where
        T: Into<String>,
        M: Into<String>,
    {
        Message::new("PRIVMSG").with_param(target).with_trailing(text)
    }

    /// Create a JOIN for a channel.
    #[must_use]
    pub fn join<C: Into<String>>(channel: C) -> Self {
        Message::new("JOIN").with_param(channel)
    }

    /// Create a PART for a channel.
    #[must_use]
    pub fn part<C: Into<String>>(channel: C) -> Self {
        Message::new("PART").with_param(channel)
    }

    /// Create a NICK registration line.
    #[must_use]
    pub fn nick<N: Into<String>>(nickname: N) -> Self {
        Message::new("NICK").with_param(nickname)
    }

    /// Create a PASS registration line.
    #[must_use]
    pub fn pass<P: Into<String>>(password: P) -> Self {
        Message::new("PASS").with_param(password)
    }

    /// Create a `CAP REQ` for the given capabilities.
    #[must_use]
    pub fn cap_req<I, S>(caps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = caps
            .into_iter()
            .map(|c| c.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(" ");
        Message::new("CAP").with_param("REQ").with_trailing(list)
    }

    /// Create a PING with a token.
    #[must_use]
    pub fn ping<T: Into<String>>(token: T) -> Self {
        Message::new("PING").with_trailing(token)
    }

    /// Create a PONG echoing a PING token.
    #[must_use]
    pub fn pong<T: Into<String>>(token: T) -> Self {
        Message::new("PONG").with_trailing(token)
    }

    /// Append a middle parameter.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Set the trailing parameter.
    #[must_use]
    pub fn with_trailing(mut self, trailing: impl Into<String>) -> Self {
        self.trailing = Some(trailing.into());
        self
    }

    /// Add a single tag to this message.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }

    /// Replace all tags of this message.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Set the prefix/source of this message.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privmsg_constructor() {
        let msg = Message::privmsg("#channel", "Hello, world!");
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#channel".to_string()]);
        assert_eq!(msg.trailing.as_deref(), Some("Hello, world!"));
        assert!(msg.tags.is_empty());
        assert!(msg.prefix.is_none());
    }

    #[test]
    fn test_join_constructor() {
        let msg = Message::join("#test");
        assert_eq!(msg.command, "JOIN");
        assert_eq!(msg.param(0), Some("#test"));
        assert!(msg.trailing.is_none());
    }

    #[test]
    fn test_cap_req_constructor() {
        let msg = Message::cap_req(["twitch.tv/tags", "twitch.tv/commands"]);
        assert_eq!(msg.to_string(), "CAP REQ :twitch.tv/tags twitch.tv/commands");
    }

    #[test]
    fn test_pong_constructor() {
        let msg = Message::pong("tmi.twitch.tv");
        assert_eq!(msg.to_string(), "PONG :tmi.twitch.tv");
    }

    #[test]
    fn test_is_numeric() {
        assert!(Message::new("353").is_numeric());
        assert!(!Message::new("35").is_numeric());
        assert!(!Message::new("PRIVMSG").is_numeric());
    }

    #[test]
    fn test_channel_accessor() {
        let msg = Message::new("JOIN").with_param("#ada");
        assert_eq!(msg.channel(), Some("#ada"));

        let msg = Message::new("MODE").with_param("ada");
        assert_eq!(msg.channel(), None);
    }

    #[test]
    fn test_sent_at() {
        let msg = Message::new("PRIVMSG").with_tag("tmi-sent-ts", "1507246572675");
        let sent = msg.sent_at().unwrap();
        assert_eq!(sent.timestamp_millis(), 1507246572675);

        let msg = Message::new("PRIVMSG").with_tag("tmi-sent-ts", "soon");
        assert!(msg.sent_at().is_none());
    }

    #[test]
    fn test_with_prefix() {
        let prefix = Prefix::new_from_str("nick!user@host");
        let msg = Message::privmsg("#test", "Hello").with_prefix(prefix.clone());
        assert_eq!(msg.prefix, Some(prefix));
        assert_eq!(msg.source_nickname(), Some("nick"));
    }
}
