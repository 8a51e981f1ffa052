//! Room state, user state and moderation decoders.

use std::str::FromStr;

use super::context::Context;
use super::registry::Handler;
use crate::event::{
    ClearChat, ClearMessage, EventPayload, GlobalUserState, HostTarget, RoomState,
    RoomStateFlags, UserState,
};

/// Read an on/off setting, marking it changed when its tag is present.
fn toggle(
    ctx: &Context<'_>,
    changed: &mut RoomStateFlags,
    flag: RoomStateFlags,
    key: &str,
) -> Option<bool> {
    ctx.msg.tag(key)?;
    changed.insert(flag);
    Some(ctx.flag(key))
}

/// Read a numeric setting, marking it changed when its tag is present.
/// An empty or unreadable value is recorded and left as `None`.
fn number<T: FromStr>(
    ctx: &mut Context<'_>,
    changed: &mut RoomStateFlags,
    flag: RoomStateFlags,
    key: &'static str,
) -> Option<T> {
    let value = ctx.present_number(key)?;
    changed.insert(flag);
    value
}

/// ROOMSTATE: a delta of the room settings that changed.
pub struct RoomStateHandler;

impl Handler for RoomStateHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let mut changed = RoomStateFlags::empty();
        let mut state = RoomState {
            channel: ctx.param(0, "channel"),
            room_id: ctx.tag_owned("room-id"),
            ..Default::default()
        };

        state.emote_only = toggle(ctx, &mut changed, RoomStateFlags::EMOTE_ONLY, "emote-only");
        state.mercury = toggle(ctx, &mut changed, RoomStateFlags::MERCURY, "mercury");
        state.r9k = toggle(ctx, &mut changed, RoomStateFlags::R9K, "r9k");
        state.rituals = toggle(ctx, &mut changed, RoomStateFlags::RITUALS, "rituals");
        state.subs_only = toggle(ctx, &mut changed, RoomStateFlags::SUBS_ONLY, "subs-only");
        state.followers_only = number(
            ctx,
            &mut changed,
            RoomStateFlags::FOLLOWERS_ONLY,
            "followers-only",
        );
        state.slow = number(ctx, &mut changed, RoomStateFlags::SLOW, "slow");

        // An empty language is a real value: the setting was cleared.
        if let Some(lang) = ctx.msg.tag("broadcaster-lang") {
            changed.insert(RoomStateFlags::BROADCASTER_LANG);
            state.broadcaster_lang = Some(lang.to_owned());
        }

        state.changed = changed;
        vec![EventPayload::RoomState(state)]
    }
}

/// USERSTATE after joining or sending to a channel.
pub struct UserStateHandler;

impl Handler for UserStateHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let state = UserState {
            channel: ctx.param(0, "channel"),
            display_name: ctx.tag_or_default("display-name"),
            color: ctx.tag_owned("color"),
            badges: ctx.badges("badges"),
            badge_info: ctx.badges("badge-info"),
            emote_sets: ctx.list("emote-sets"),
            is_moderator: ctx.flag("mod"),
            is_subscriber: ctx.flag("subscriber"),
        };
        vec![EventPayload::UserState(state)]
    }
}

/// GLOBALUSERSTATE after login.
pub struct GlobalUserStateHandler;

impl Handler for GlobalUserStateHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let state = GlobalUserState {
            user_id: ctx.tag_owned("user-id"),
            display_name: ctx.tag_or_default("display-name"),
            color: ctx.tag_owned("color"),
            badges: ctx.badges("badges"),
            emote_sets: ctx.list("emote-sets"),
        };
        vec![EventPayload::GlobalUserState(state)]
    }
}

/// `@ban-duration=600 :tmi.twitch.tv CLEARCHAT #ada :alice`
pub struct ClearChatHandler;

impl Handler for ClearChatHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let clear = ClearChat {
            channel: ctx.param(0, "channel"),
            target: ctx
                .opt_trailing()
                .filter(|t| !t.is_empty())
                .map(str::to_owned),
            target_user_id: ctx.tag_owned("target-user-id"),
            ban_duration: ctx.tag_number("ban-duration"),
        };
        vec![EventPayload::ClearChat(clear)]
    }
}

/// `@login=alice;target-msg-id=<id> :tmi.twitch.tv CLEARMSG #ada :text`
pub struct ClearMsgHandler;

impl Handler for ClearMsgHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let clear = ClearMessage {
            channel: ctx.param(0, "channel"),
            login: ctx.required_tag("login"),
            target_message_id: ctx.required_tag("target-msg-id"),
            body: ctx.trailing("body"),
        };
        vec![EventPayload::ClearMessage(clear)]
    }
}

/// `:tmi.twitch.tv HOSTTARGET #ada :bob 42`, or `:- 0` when hosting ends.
pub struct HostTargetHandler;

impl Handler for HostTargetHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let channel = ctx.param(0, "channel");
        let trailing = ctx.trailing("target");
        let mut parts = trailing.split_whitespace();

        let target = parts.next().filter(|t| *t != "-").map(str::to_owned);
        let viewers = parts.next().and_then(|v| v.parse().ok());

        vec![EventPayload::HostTarget(HostTarget {
            channel,
            target,
            viewers,
        })]
    }
}
