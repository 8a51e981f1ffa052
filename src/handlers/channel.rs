//! Membership, MODE and names-list decoders.

use tmi_proto::ChannelExt;

use super::context::Context;
use super::registry::Handler;
use crate::event::{
    ChannelMode, ChannelOperator, EndOfNames, EventPayload, Membership, ModeChange, NamesReply,
    NamesStatus, UserMode,
};

fn membership(ctx: &mut Context<'_>) -> Membership {
    Membership {
        user: ctx.source_nick("user"),
        channel: ctx.param(0, "channel"),
    }
}

/// `:alice!alice@alice.tmi.twitch.tv JOIN #ada`
pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        vec![EventPayload::Join(membership(ctx))]
    }
}

/// `:alice!alice@alice.tmi.twitch.tv PART #ada`
pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        vec![EventPayload::Part(membership(ctx))]
    }
}

/// `:jtv MODE #ada +o alice`
///
/// A channel target yields ChannelMode, followed by ChannelOperator when the
/// mode letter is `o`. Any other target yields UserMode.
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let target = ctx.param(0, "target");
        let modes = ctx.param(1, "modes");
        let arguments = ctx
            .opt_param(2)
            .or_else(|| ctx.opt_trailing())
            .unwrap_or_default();
        let change = ModeChange::parse(&modes, arguments);

        if !target.is_channel_name() {
            return vec![EventPayload::UserMode(UserMode { target, change })];
        }

        let mode = ChannelMode {
            channel: target,
            change,
        };
        let operator = ChannelOperator::from_mode(&mode);
        let mut events = vec![EventPayload::ChannelMode(mode)];
        events.extend(operator.map(EventPayload::ChannelOperator));
        events
    }
}

/// `:tmi.twitch.tv 353 me = #ada :alice bob carol`
pub struct NamesReplyHandler;

impl Handler for NamesReplyHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let status = NamesStatus::from_symbol(&ctx.param(1, "status"));
        let channel = ctx.param(2, "channel");
        let names: Vec<String> = ctx
            .trailing("names")
            .split_whitespace()
            .map(str::to_owned)
            .collect();

        ctx.names.push(&channel, names.iter().cloned());

        vec![EventPayload::NamesReply(NamesReply {
            channel,
            status,
            names,
        })]
    }
}

/// `:tmi.twitch.tv 366 me #ada :End of /NAMES list`
pub struct EndOfNamesHandler;

impl Handler for EndOfNamesHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let channel = ctx.param(1, "channel");
        let names = ctx.names.take(&channel);
        vec![EventPayload::EndOfNames(EndOfNames { channel, names })]
    }
}
