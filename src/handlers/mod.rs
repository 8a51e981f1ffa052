//! Inbound dispatch: line → [`Message`] → decoder → [`Event`]s.
//!
//! The [`Dispatcher`] owns the decoder [`Registry`] and the per-connection
//! [`NameAccumulator`]. It decodes one line to completion before returning,
//! and never panics on bad input: a line the tokenizer rejects comes back
//! as [`MalformedMessage`], a line with missing fields comes back as events
//! plus an [`IncompleteFields`] report.

mod channel;
mod context;
mod messaging;
mod registry;
mod room;
mod server;

use std::sync::Arc;

use tmi_proto::Message;
use tracing::{debug, trace};

use crate::error::{IncompleteFields, MalformedMessage};
use crate::event::Event;
use crate::telemetry::spans;

pub use context::{Context, NameAccumulator};
pub use registry::{Handler, Registry};

/// Result of decoding one line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    /// Events in emission order.
    pub events: Vec<Event>,
    /// Fields that were defaulted, if any.
    pub incomplete: Option<IncompleteFields>,
}

impl Dispatch {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Decoder pipeline for one connection.
#[derive(Default)]
pub struct Dispatcher {
    registry: Registry,
    names: NameAccumulator,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize and decode one line. A trailing CR/LF is ignored.
    pub fn dispatch(&mut self, line: &str) -> Result<Dispatch, MalformedMessage> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        let message: Message = trimmed
            .parse()
            .map_err(|e| MalformedMessage::new(trimmed, e))?;
        Ok(self.dispatch_message(message))
    }

    /// Decode an already tokenized message.
    pub fn dispatch_message(&mut self, message: Message) -> Dispatch {
        let raw = Arc::new(message);
        let kind = raw.kind();
        let _span = spans::dispatch(&raw.command).entered();
        trace!(kind = kind.as_str(), "dispatching");

        let mut ctx = Context::new(&raw, &mut self.names);
        let payloads = self.registry.get(kind).handle(&mut ctx);
        let missing = ctx.into_missing();

        let events: Vec<Event> = payloads
            .into_iter()
            .map(|payload| Event::new(Arc::clone(&raw), payload))
            .collect();

        let incomplete = match events.first() {
            Some(first) if !missing.is_empty() => {
                debug!(kind = %first.kind(), missing = ?missing, "line is missing fields");
                Some(IncompleteFields {
                    kind: first.kind(),
                    missing,
                })
            }
            _ => None,
        };

        Dispatch { events, incomplete }
    }

    /// Names buffered for `channel` and not yet closed by an end-of-names.
    pub fn pending_names(&self, channel: &str) -> &[String] {
        self.names.pending(channel)
    }

    /// Forget per-connection state.
    pub fn reset(&mut self) {
        self.names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{
        EventKind, EventPayload, NamesStatus, NoticeType, RoomStateFlags, SubPlan, UserNoticeKind,
    };

    fn payloads(line: &str) -> Vec<EventPayload> {
        Dispatcher::new()
            .dispatch(line)
            .unwrap()
            .events
            .into_iter()
            .map(Event::into_payload)
            .collect()
    }

    fn single(line: &str) -> EventPayload {
        let mut all = payloads(line);
        assert_eq!(all.len(), 1, "{line}");
        all.remove(0)
    }

    #[test]
    fn names_reply_public() {
        let EventPayload::NamesReply(reply) =
            single(":tmi.twitch.tv 353 user = #channel :alice bob carol")
        else {
            panic!("expected NamesReply");
        };
        assert!(reply.is_public());
        assert_eq!(reply.status, NamesStatus::Public);
        assert_eq!(reply.channel, "#channel");
        assert_eq!(reply.names, ["alice", "bob", "carol"]);
    }

    #[test]
    fn names_fragments_are_concatenated() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .dispatch(":tmi.twitch.tv 353 me = #ada :alice bob")
            .unwrap();
        dispatcher
            .dispatch(":tmi.twitch.tv 353 me = #ada :carol alice")
            .unwrap();
        assert_eq!(dispatcher.pending_names("#ada").len(), 4);

        let end = dispatcher
            .dispatch(":tmi.twitch.tv 366 me #ada :End of /NAMES list")
            .unwrap();
        let EventPayload::EndOfNames(end) = end.events[0].payload() else {
            panic!("expected EndOfNames");
        };
        assert_eq!(end.names, ["alice", "bob", "carol", "alice"]);
        assert!(dispatcher.pending_names("#ada").is_empty());
    }

    #[test]
    fn operator_follows_channel_mode() {
        let all = payloads(":jtv MODE #ada +o alice");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].kind(), EventKind::ChannelMode);
        let EventPayload::ChannelOperator(op) = &all[1] else {
            panic!("expected ChannelOperator");
        };
        assert_eq!(op.user, "alice");
        assert!(op.is_operator);

        assert_eq!(single(":jtv MODE ada +i").kind(), EventKind::UserMode);
    }

    #[test]
    fn tagged_privmsg() {
        let line = "@badge-info=subscriber/8;badges=subscriber/6,premium/1;color=#1E90FF;\
                    display-name=Ada;emotes=25:0-4;id=b34ccfc7-4977-403a-8a94-33c6bac34fb8;\
                    mod=1;room-id=1337;tmi-sent-ts=1507246572675;user-id=42 \
                    :ada!ada@ada.tmi.twitch.tv PRIVMSG #ada :Kappa hello";
        let EventPayload::PrivateMessage(msg) = single(line) else {
            panic!("expected PrivateMessage");
        };
        assert_eq!(msg.color.as_deref(), Some("#1E90FF"));
        assert_eq!(msg.display_name, "Ada");
        assert_eq!(msg.user, "ada");
        assert_eq!(msg.body, "Kappa hello");
        assert_eq!(msg.badge_version("subscriber"), Some("6"));
        assert_eq!(msg.badges.len(), 2);
        assert_eq!(msg.emotes[0].end, 4);
        assert!(msg.is_moderator);
        assert!(!msg.is_action);
        assert!(msg.sent_at.is_some());
    }

    #[test]
    fn action_privmsg() {
        let EventPayload::PrivateMessage(msg) =
            single(":ada!ada@ada.tmi.twitch.tv PRIVMSG #ada :\u{1}ACTION waves\u{1}")
        else {
            panic!("expected PrivateMessage");
        };
        assert!(msg.is_action);
        assert_eq!(msg.body, "waves");
    }

    #[test]
    fn usernotice_kinds() {
        let EventPayload::UserNotice(notice) = single(
            "@msg-id=resub;login=ada;msg-param-cumulative-months=7;msg-param-streak-months=3;\
             msg-param-sub-plan=2000 :tmi.twitch.tv USERNOTICE #ada :still here",
        ) else {
            panic!("expected UserNotice");
        };
        assert_eq!(
            notice.kind,
            UserNoticeKind::Resub {
                cumulative_months: 7,
                streak_months: 3,
                plan: Some(SubPlan::Tier2)
            }
        );
        assert_eq!(notice.body.as_deref(), Some("still here"));

        let EventPayload::UserNotice(notice) =
            single("@msg-id=bitsbadgetier;login=ada :tmi.twitch.tv USERNOTICE #ada")
        else {
            panic!("expected UserNotice");
        };
        assert_eq!(notice.kind, UserNoticeKind::None);
        assert_eq!(notice.body, None);
    }

    #[test]
    fn notice_taxonomy() {
        let EventPayload::Notice(notice) =
            single("@msg-id=slow_on :tmi.twitch.tv NOTICE #ada :This room is now in slow mode.")
        else {
            panic!("expected Notice");
        };
        assert_eq!(notice.kind, NoticeType::SlowOn);

        let EventPayload::Notice(notice) = single(":tmi.twitch.tv NOTICE * :Login failed") else {
            panic!("expected Notice");
        };
        assert_eq!(notice.kind, NoticeType::None);
    }

    #[test]
    fn roomstate_slow_only() {
        let EventPayload::RoomState(state) = single("@slow=10 :tmi.twitch.tv ROOMSTATE #ada")
        else {
            panic!("expected RoomState");
        };
        assert_eq!(state.changed, RoomStateFlags::SLOW);
        assert_eq!(state.slow, Some(10));
        assert_eq!(state.emote_only, None);
    }

    #[test]
    fn roomstate_unreadable_setting_still_changes() {
        for (line, flag) in [
            ("@slow= :tmi.twitch.tv ROOMSTATE #ada", RoomStateFlags::SLOW),
            ("@slow=abc :tmi.twitch.tv ROOMSTATE #ada", RoomStateFlags::SLOW),
            (
                "@followers-only= :tmi.twitch.tv ROOMSTATE #ada",
                RoomStateFlags::FOLLOWERS_ONLY,
            ),
        ] {
            let dispatch = Dispatcher::new().dispatch(line).unwrap();
            let EventPayload::RoomState(state) = dispatch.events[0].payload() else {
                panic!("expected RoomState");
            };
            assert_eq!(state.changed, flag, "{line}");
            assert_eq!(state.slow, None);
            assert_eq!(state.followers_only, None);

            let incomplete = dispatch.incomplete.unwrap();
            assert_eq!(incomplete.kind, EventKind::RoomState);
            assert_eq!(incomplete.missing.len(), 1);
        }
    }

    #[test]
    fn hosttarget_unhost() {
        let EventPayload::HostTarget(host) = single(":tmi.twitch.tv HOSTTARGET #ada :- 0") else {
            panic!("expected HostTarget");
        };
        assert_eq!(host.target, None);
        assert_eq!(host.viewers, Some(0));
    }

    #[test]
    fn missing_fields_are_reported() {
        let dispatch = Dispatcher::new().dispatch("JOIN").unwrap();
        assert_eq!(dispatch.events.len(), 1);
        let incomplete = dispatch.incomplete.unwrap();
        assert_eq!(incomplete.kind, EventKind::Join);
        assert_eq!(incomplete.missing, ["user", "channel"]);
    }

    #[test]
    fn unknown_and_numeric_fallbacks() {
        let EventPayload::Unknown(unknown) = single(":tmi.twitch.tv FOO bar :baz") else {
            panic!("expected Unknown");
        };
        assert_eq!(unknown.command, "FOO");
        assert_eq!(unknown.text, "baz");

        assert_eq!(
            single(":tmi.twitch.tv 376 me :>").kind(),
            EventKind::ServerReply
        );
        assert_eq!(single(":tmi.twitch.tv 999 me :?").kind(), EventKind::Unknown);
    }

    #[test]
    fn empty_line_is_malformed() {
        let mut dispatcher = Dispatcher::new();
        assert!(dispatcher.dispatch("").is_err());
        assert!(dispatcher.dispatch("\r\n").is_err());
        assert!(dispatcher.dispatch("@a=b").is_err());
    }

    #[test]
    fn ping_token() {
        let EventPayload::Ping(ping) = single("PING :tmi.twitch.tv") else {
            panic!("expected Ping");
        };
        assert_eq!(ping.token, "tmi.twitch.tv");
    }
}
