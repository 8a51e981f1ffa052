//! Chat message payloads and their tag sub-parsers.

use chrono::{DateTime, Utc};
use tmi_proto::{ChannelExt, ChannelForm};

/// A chat badge (`subscriber/12`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub name: String,
    pub version: String,
}

impl Badge {
    /// Parse a `badges` or `badge-info` tag value, keeping order.
    ///
    /// Entries without a `/` get an empty version; empty entries are skipped.
    pub fn parse_list(raw: &str) -> Vec<Badge> {
        raw.split(',')
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (name, version) = entry.split_once('/').unwrap_or((entry, ""));
                Badge {
                    name: name.to_owned(),
                    version: version.to_owned(),
                }
            })
            .collect()
    }
}

/// Character range of an emote in the message body (inclusive, in chars).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmoteRange {
    pub id: String,
    pub start: usize,
    pub end: usize,
}

impl EmoteRange {
    /// Parse an `emotes` tag value (`25:0-4,12-16/1902:6-10`).
    ///
    /// Unreadable ranges are skipped rather than failing the whole list.
    pub fn parse_list(raw: &str) -> Vec<EmoteRange> {
        let mut ranges = Vec::new();
        for emote in raw.split('/').filter(|e| !e.is_empty()) {
            let Some((id, spans)) = emote.split_once(':') else {
                continue;
            };
            for span in spans.split(',') {
                let parsed = span
                    .split_once('-')
                    .and_then(|(s, e)| Some((s.parse::<usize>().ok()?, e.parse::<usize>().ok()?)));
                if let Some((start, end)) = parsed.filter(|(s, e)| s <= e) {
                    ranges.push(EmoteRange {
                        id: id.to_owned(),
                        start,
                        end,
                    });
                }
            }
        }
        ranges
    }
}

/// Where a chat message was posted, from the form of its channel name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MessageSource {
    /// A broadcaster's channel (`#login`).
    Channel,
    /// A chat room (`#chatrooms:<channel-id>:<room-id>`).
    ChatRoom { channel_id: String, room_id: String },
    #[default]
    Other,
}

impl MessageSource {
    pub fn classify(channel: &str) -> Self {
        match channel.channel_form() {
            ChannelForm::Channel(_) => Self::Channel,
            ChannelForm::ChatRoom {
                channel_id,
                room_id,
            } => Self::ChatRoom {
                channel_id: channel_id.to_owned(),
                room_id: room_id.to_owned(),
            },
            ChannelForm::Other => Self::Other,
        }
    }
}

/// Split a CTCP `ACTION` (`/me`) body from ordinary text.
pub(crate) fn strip_action(body: &str) -> (bool, &str) {
    match body
        .strip_prefix("\u{1}ACTION ")
        .map(|rest| rest.strip_suffix('\u{1}').unwrap_or(rest))
    {
        Some(text) => (true, text),
        None => (false, body),
    }
}

/// PRIVMSG to a channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrivateMessage {
    pub channel: String,
    pub source: MessageSource,
    /// Sender login, from the prefix.
    pub user: String,
    pub display_name: String,
    pub color: Option<String>,
    pub badges: Vec<Badge>,
    pub badge_info: Vec<Badge>,
    /// Bits cheered with this message (0 when none).
    pub bits: u64,
    pub emotes: Vec<EmoteRange>,
    pub message_id: Option<String>,
    pub user_id: Option<String>,
    pub room_id: Option<String>,
    pub is_moderator: bool,
    pub is_subscriber: bool,
    pub is_turbo: bool,
    pub user_type: String,
    /// Sent with `/me`.
    pub is_action: bool,
    pub body: String,
    pub sent_at: Option<DateTime<Utc>>,
}

impl PrivateMessage {
    pub fn has_badge(&self, name: &str) -> bool {
        self.badges.iter().any(|b| b.name == name)
    }

    pub fn badge_version(&self, name: &str) -> Option<&str> {
        self.badges
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.version.as_str())
    }

    pub fn is_broadcaster(&self) -> bool {
        self.has_badge("broadcaster")
    }
}

/// Direct message between two users.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Whisper {
    /// Sender login, from the prefix.
    pub from: String,
    /// Recipient login.
    pub to: String,
    pub display_name: String,
    pub color: Option<String>,
    pub badges: Vec<Badge>,
    pub emotes: Vec<EmoteRange>,
    pub message_id: Option<String>,
    pub thread_id: Option<String>,
    pub user_id: Option<String>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_keep_order() {
        let badges = Badge::parse_list("broadcaster/1,subscriber/12,glhf-pledge");
        let names: Vec<_> = badges.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["broadcaster", "subscriber", "glhf-pledge"]);
        assert_eq!(badges[1].version, "12");
        assert_eq!(badges[2].version, "");
        assert!(Badge::parse_list("").is_empty());
    }

    #[test]
    fn emote_ranges() {
        let ranges = EmoteRange::parse_list("25:0-4,12-16/1902:6-10");
        assert_eq!(ranges.len(), 3);
        assert_eq!(
            ranges[2],
            EmoteRange {
                id: "1902".into(),
                start: 6,
                end: 10
            }
        );
        assert!(EmoteRange::parse_list("").is_empty());
        assert_eq!(EmoteRange::parse_list("25:x-4,3-1,5-6").len(), 1);
    }

    #[test]
    fn source_from_channel_form() {
        assert_eq!(MessageSource::classify("#ada"), MessageSource::Channel);
        assert_eq!(
            MessageSource::classify("#chatrooms:1337:abc"),
            MessageSource::ChatRoom {
                channel_id: "1337".into(),
                room_id: "abc".into()
            }
        );
        assert_eq!(MessageSource::classify("ada"), MessageSource::Other);
    }

    #[test]
    fn action_detection() {
        assert_eq!(strip_action("\u{1}ACTION waves\u{1}"), (true, "waves"));
        assert_eq!(strip_action("hello"), (false, "hello"));
    }
}
