//! Decoder registry.
//!
//! Maps each [`MessageKind`] onto the decoder that builds its events. Kinds
//! without an entry fall back to [`ServerReplyHandler`] (known numerics) or
//! [`UnknownHandler`] (everything else), so lookup never fails.

use std::collections::HashMap;

use tmi_proto::{MessageKind, Response};

use super::channel::{EndOfNamesHandler, JoinHandler, ModeHandler, NamesReplyHandler, PartHandler};
use super::context::Context;
use super::messaging::{NoticeHandler, PrivmsgHandler, UserNoticeHandler, WhisperHandler};
use super::room::{
    ClearChatHandler, ClearMsgHandler, GlobalUserStateHandler, HostTargetHandler,
    RoomStateHandler, UserStateHandler,
};
use super::server::{
    CapHandler, KeepaliveHandler, MotdHandler, ReconnectHandler, ServerReplyHandler,
    UnknownCommandHandler, UnknownHandler, WelcomeHandler,
};
use crate::event::EventPayload;

/// A decoder for one kind of line.
///
/// Decoders are synchronous and never fail: fields they cannot find are
/// defaulted and recorded on the [`Context`].
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload>;
}

/// Registry of decoders.
pub struct Registry {
    handlers: HashMap<MessageKind, Box<dyn Handler>>,
    numeric_fallback: ServerReplyHandler,
    fallback: UnknownHandler,
}

impl Registry {
    /// Create a registry with every decoder registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<MessageKind, Box<dyn Handler>> = HashMap::new();

        // Membership and modes
        handlers.insert(MessageKind::Join, Box::new(JoinHandler));
        handlers.insert(MessageKind::Part, Box::new(PartHandler));
        handlers.insert(MessageKind::Mode, Box::new(ModeHandler));
        handlers.insert(
            MessageKind::Numeric(Response::RPL_NAMREPLY),
            Box::new(NamesReplyHandler),
        );
        handlers.insert(
            MessageKind::Numeric(Response::RPL_ENDOFNAMES),
            Box::new(EndOfNamesHandler),
        );

        // Chat
        handlers.insert(MessageKind::PrivMsg, Box::new(PrivmsgHandler));
        handlers.insert(MessageKind::Whisper, Box::new(WhisperHandler));
        handlers.insert(MessageKind::UserNotice, Box::new(UserNoticeHandler));
        handlers.insert(MessageKind::Notice, Box::new(NoticeHandler));

        // Room and user state
        handlers.insert(MessageKind::RoomState, Box::new(RoomStateHandler));
        handlers.insert(MessageKind::UserState, Box::new(UserStateHandler));
        handlers.insert(MessageKind::GlobalUserState, Box::new(GlobalUserStateHandler));
        handlers.insert(MessageKind::ClearChat, Box::new(ClearChatHandler));
        handlers.insert(MessageKind::ClearMsg, Box::new(ClearMsgHandler));
        handlers.insert(MessageKind::HostTarget, Box::new(HostTargetHandler));

        // Server
        handlers.insert(
            MessageKind::Numeric(Response::RPL_WELCOME),
            Box::new(WelcomeHandler),
        );
        handlers.insert(MessageKind::Numeric(Response::RPL_MOTD), Box::new(MotdHandler));
        handlers.insert(
            MessageKind::Numeric(Response::ERR_UNKNOWNCOMMAND),
            Box::new(UnknownCommandHandler),
        );
        handlers.insert(MessageKind::Ping, Box::new(KeepaliveHandler::Ping));
        handlers.insert(MessageKind::Pong, Box::new(KeepaliveHandler::Pong));
        handlers.insert(MessageKind::Cap, Box::new(CapHandler));
        handlers.insert(MessageKind::Reconnect, Box::new(ReconnectHandler));

        Self {
            handlers,
            numeric_fallback: ServerReplyHandler,
            fallback: UnknownHandler,
        }
    }

    /// Decoder for `kind`.
    pub fn get(&self, kind: MessageKind) -> &dyn Handler {
        match self.handlers.get(&kind) {
            Some(handler) => handler.as_ref(),
            None if matches!(kind, MessageKind::Numeric(_)) => &self.numeric_fallback,
            None => &self.fallback,
        }
    }

    /// Whether `kind` has a dedicated decoder.
    pub fn has_handler(&self, kind: MessageKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Number of dedicated decoders.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
