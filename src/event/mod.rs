//! Typed events produced by the dispatcher.
//!
//! Every [`Event`] keeps a shared, read-only reference to the [`Message`] it
//! was decoded from. The payload is one variant per event kind.

pub mod channel;
pub mod notice;
pub mod privmsg;
pub mod roomstate;
pub mod server;
pub mod user;
pub mod usernotice;

use std::fmt;
use std::sync::Arc;

use tmi_proto::Message;

pub use channel::{
    ChannelMode, ChannelOperator, EndOfNames, Membership, ModeChange, ModeModifier, NamesReply,
    NamesStatus, UserMode,
};
pub use notice::{Notice, NoticeType};
pub use privmsg::{Badge, EmoteRange, MessageSource, PrivateMessage, Whisper};
pub use roomstate::{RoomSnapshot, RoomState, RoomStateFlags};
pub use server::{Capability, Keepalive, ServerReply, ServerText, Unknown, UnknownCommand};
pub use user::{ClearChat, ClearMessage, GlobalUserState, HostTarget, UserState};
pub use usernotice::{SubPlan, UserNotice, UserNoticeKind};

/// Discriminant of an [`Event`], for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Join,
    Part,
    ChannelMode,
    UserMode,
    ChannelOperator,
    NamesReply,
    EndOfNames,
    Welcome,
    Motd,
    ServerReply,
    UnknownCommand,
    PrivateMessage,
    Whisper,
    UserNotice,
    Notice,
    RoomState,
    UserState,
    GlobalUserState,
    ClearChat,
    ClearMessage,
    HostTarget,
    Reconnect,
    Ping,
    Pong,
    Capability,
    Unknown,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "Join",
            Self::Part => "Part",
            Self::ChannelMode => "ChannelMode",
            Self::UserMode => "UserMode",
            Self::ChannelOperator => "ChannelOperator",
            Self::NamesReply => "NamesReply",
            Self::EndOfNames => "EndOfNames",
            Self::Welcome => "Welcome",
            Self::Motd => "Motd",
            Self::ServerReply => "ServerReply",
            Self::UnknownCommand => "UnknownCommand",
            Self::PrivateMessage => "PrivateMessage",
            Self::Whisper => "Whisper",
            Self::UserNotice => "UserNotice",
            Self::Notice => "Notice",
            Self::RoomState => "RoomState",
            Self::UserState => "UserState",
            Self::GlobalUserState => "GlobalUserState",
            Self::ClearChat => "ClearChat",
            Self::ClearMessage => "ClearMessage",
            Self::HostTarget => "HostTarget",
            Self::Reconnect => "Reconnect",
            Self::Ping => "Ping",
            Self::Pong => "Pong",
            Self::Capability => "Capability",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded content of an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Join(Membership),
    Part(Membership),
    ChannelMode(ChannelMode),
    UserMode(UserMode),
    ChannelOperator(ChannelOperator),
    NamesReply(NamesReply),
    EndOfNames(EndOfNames),
    Welcome(ServerText),
    Motd(ServerText),
    ServerReply(ServerReply),
    UnknownCommand(UnknownCommand),
    PrivateMessage(PrivateMessage),
    Whisper(Whisper),
    UserNotice(UserNotice),
    Notice(Notice),
    RoomState(RoomState),
    UserState(UserState),
    GlobalUserState(GlobalUserState),
    ClearChat(ClearChat),
    ClearMessage(ClearMessage),
    HostTarget(HostTarget),
    Reconnect,
    Ping(Keepalive),
    Pong(Keepalive),
    Capability(Capability),
    Unknown(Unknown),
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Join(_) => EventKind::Join,
            Self::Part(_) => EventKind::Part,
            Self::ChannelMode(_) => EventKind::ChannelMode,
            Self::UserMode(_) => EventKind::UserMode,
            Self::ChannelOperator(_) => EventKind::ChannelOperator,
            Self::NamesReply(_) => EventKind::NamesReply,
            Self::EndOfNames(_) => EventKind::EndOfNames,
            Self::Welcome(_) => EventKind::Welcome,
            Self::Motd(_) => EventKind::Motd,
            Self::ServerReply(_) => EventKind::ServerReply,
            Self::UnknownCommand(_) => EventKind::UnknownCommand,
            Self::PrivateMessage(_) => EventKind::PrivateMessage,
            Self::Whisper(_) => EventKind::Whisper,
            Self::UserNotice(_) => EventKind::UserNotice,
            Self::Notice(_) => EventKind::Notice,
            Self::RoomState(_) => EventKind::RoomState,
            Self::UserState(_) => EventKind::UserState,
            Self::GlobalUserState(_) => EventKind::GlobalUserState,
            Self::ClearChat(_) => EventKind::ClearChat,
            Self::ClearMessage(_) => EventKind::ClearMessage,
            Self::HostTarget(_) => EventKind::HostTarget,
            Self::Reconnect => EventKind::Reconnect,
            Self::Ping(_) => EventKind::Ping,
            Self::Pong(_) => EventKind::Pong,
            Self::Capability(_) => EventKind::Capability,
            Self::Unknown(_) => EventKind::Unknown,
        }
    }

    /// Channel the event concerns, when it has one.
    pub fn channel(&self) -> Option<&str> {
        let channel = match self {
            Self::Join(m) | Self::Part(m) => &m.channel,
            Self::ChannelMode(m) => &m.channel,
            Self::ChannelOperator(o) => &o.channel,
            Self::NamesReply(n) => &n.channel,
            Self::EndOfNames(n) => &n.channel,
            Self::PrivateMessage(m) => &m.channel,
            Self::UserNotice(n) => &n.channel,
            Self::Notice(n) => &n.channel,
            Self::RoomState(r) => &r.channel,
            Self::UserState(u) => &u.channel,
            Self::ClearChat(c) => &c.channel,
            Self::ClearMessage(c) => &c.channel,
            Self::HostTarget(h) => &h.channel,
            _ => return None,
        };
        Some(channel.as_str()).filter(|c| !c.is_empty())
    }
}

/// One decoded event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    raw: Arc<Message>,
    payload: EventPayload,
}

impl Event {
    pub fn new(raw: Arc<Message>, payload: EventPayload) -> Self {
        Self { raw, payload }
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// The message this event was decoded from.
    pub fn raw(&self) -> &Message {
        &self.raw
    }

    /// Shared handle to the source message.
    pub fn raw_shared(&self) -> Arc<Message> {
        Arc::clone(&self.raw)
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn into_payload(self) -> EventPayload {
        self.payload
    }

    pub fn channel(&self) -> Option<&str> {
        self.payload.channel()
    }
}
