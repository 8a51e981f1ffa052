//! PRIVMSG, WHISPER, USERNOTICE and NOTICE decoders.
//!
//! Chat lines carry most of their meaning in tags. Tags are optional by
//! nature, so only the ones a payload cannot be understood without are
//! recorded as missing.

use super::context::Context;
use super::registry::Handler;
use crate::event::privmsg::strip_action;
use crate::event::{
    EmoteRange, EventPayload, MessageSource, Notice, NoticeType, PrivateMessage, SubPlan,
    UserNotice, UserNoticeKind, Whisper,
};

fn display_name(ctx: &Context<'_>, login: &str) -> String {
    ctx.tag_owned("display-name")
        .unwrap_or_else(|| login.to_owned())
}

fn emotes(ctx: &Context<'_>) -> Vec<EmoteRange> {
    ctx.tag("emotes")
        .map(EmoteRange::parse_list)
        .unwrap_or_default()
}

/// Tagged chat message to a channel.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let channel = ctx.param(0, "channel");
        let user = ctx.source_nick("user");
        let raw_body = ctx.trailing("body");
        let (is_action, body) = strip_action(&raw_body);

        let message = PrivateMessage {
            source: MessageSource::classify(&channel),
            display_name: display_name(ctx, &user),
            color: ctx.tag_owned("color"),
            badges: ctx.badges("badges"),
            badge_info: ctx.badges("badge-info"),
            bits: ctx.tag_number("bits").unwrap_or(0),
            emotes: emotes(ctx),
            message_id: ctx.tag_owned("id"),
            user_id: ctx.tag_owned("user-id"),
            room_id: ctx.tag_owned("room-id"),
            is_moderator: ctx.flag("mod"),
            is_subscriber: ctx.flag("subscriber"),
            is_turbo: ctx.flag("turbo"),
            user_type: ctx.tag_or_default("user-type"),
            is_action,
            body: body.to_owned(),
            sent_at: ctx.msg.sent_at(),
            channel,
            user,
        };
        vec![EventPayload::PrivateMessage(message)]
    }
}

/// `:alice!alice@alice.tmi.twitch.tv WHISPER bob :hi`
pub struct WhisperHandler;

impl Handler for WhisperHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let from = ctx.source_nick("user");
        let to = ctx.param(0, "recipient");
        let body = ctx.trailing("body");

        let whisper = Whisper {
            display_name: display_name(ctx, &from),
            color: ctx.tag_owned("color"),
            badges: ctx.badges("badges"),
            emotes: emotes(ctx),
            message_id: ctx.tag_owned("message-id"),
            thread_id: ctx.tag_owned("thread-id"),
            user_id: ctx.tag_owned("user-id"),
            from,
            to,
            body,
        };
        vec![EventPayload::Whisper(whisper)]
    }
}

fn sub_plan(ctx: &Context<'_>) -> Option<SubPlan> {
    ctx.tag("msg-param-sub-plan").and_then(SubPlan::from_tag)
}

fn notice_kind(ctx: &mut Context<'_>, msg_id: &str, login: &str) -> UserNoticeKind {
    match msg_id {
        "sub" => UserNoticeKind::Sub {
            plan: sub_plan(ctx),
        },
        "resub" => UserNoticeKind::Resub {
            cumulative_months: ctx.required_number("msg-param-cumulative-months"),
            streak_months: ctx.tag_number("msg-param-streak-months").unwrap_or(0),
            plan: sub_plan(ctx),
        },
        "subgift" | "anonsubgift" => {
            let recipient_login = ctx.required_tag("msg-param-recipient-user-name");
            let recipient_display_name = ctx
                .tag_owned("msg-param-recipient-display-name")
                .unwrap_or_else(|| recipient_login.clone());
            UserNoticeKind::GiftSub {
                recipient_login,
                recipient_display_name,
                plan: sub_plan(ctx),
            }
        }
        "raid" => UserNoticeKind::Raid {
            raider: ctx
                .tag_owned("msg-param-displayName")
                .or_else(|| ctx.tag_owned("msg-param-login"))
                .unwrap_or_else(|| login.to_owned()),
            viewer_count: ctx.required_number("msg-param-viewerCount"),
        },
        "ritual" => UserNoticeKind::Ritual {
            ritual: ctx.required_tag("msg-param-ritual-name"),
        },
        _ => UserNoticeKind::None,
    }
}

/// Subscription, raid and ritual announcements.
pub struct UserNoticeHandler;

impl Handler for UserNoticeHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let channel = ctx.param(0, "channel");
        let msg_id = ctx.required_tag("msg-id");
        let login = ctx.tag_or_default("login");
        let kind = notice_kind(ctx, &msg_id, &login);

        let notice = UserNotice {
            display_name: display_name(ctx, &login),
            color: ctx.tag_owned("color"),
            badges: ctx.badges("badges"),
            system_message: ctx.tag_or_default("system-msg"),
            body: ctx.opt_trailing().map(str::to_owned),
            channel,
            kind,
            msg_id,
            login,
        };
        vec![EventPayload::UserNotice(notice)]
    }
}

/// `@msg-id=slow_on :tmi.twitch.tv NOTICE #ada :This room is now in slow mode.`
pub struct NoticeHandler;

impl Handler for NoticeHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let channel = ctx.param(0, "channel");
        let kind = ctx
            .tag("msg-id")
            .map_or(NoticeType::None, NoticeType::from_msg_id);
        let text = ctx.trailing("text");
        vec![EventPayload::Notice(Notice {
            channel,
            kind,
            text,
        })]
    }
}
