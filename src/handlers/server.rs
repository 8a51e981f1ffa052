//! Server numerics, keepalives, capability replies and the fallbacks.

use tmi_proto::MessageKind;

use super::context::Context;
use super::registry::Handler;
use crate::event::{
    Capability, EventPayload, Keepalive, ServerReply, ServerText, Unknown, UnknownCommand,
};

fn server_text(ctx: &mut Context<'_>) -> ServerText {
    ServerText {
        target: ctx.param(0, "target"),
        text: ctx.trailing("text"),
    }
}

/// 001
pub struct WelcomeHandler;

impl Handler for WelcomeHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        vec![EventPayload::Welcome(server_text(ctx))]
    }
}

/// 372
pub struct MotdHandler;

impl Handler for MotdHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        vec![EventPayload::Motd(server_text(ctx))]
    }
}

/// `:tmi.twitch.tv 421 me WHO :Unknown command`
pub struct UnknownCommandHandler;

impl Handler for UnknownCommandHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        vec![EventPayload::UnknownCommand(UnknownCommand {
            command: ctx.param(1, "command"),
            text: ctx.opt_trailing().unwrap_or_default().to_owned(),
        })]
    }
}

/// Known numerics without a dedicated decoder.
pub struct ServerReplyHandler;

impl Handler for ServerReplyHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let MessageKind::Numeric(code) = ctx.msg.kind() else {
            return UnknownHandler.handle(ctx);
        };
        vec![EventPayload::ServerReply(ServerReply {
            code,
            target: ctx.param(0, "target"),
            params: ctx.msg.params.iter().skip(1).cloned().collect(),
            text: ctx.opt_trailing().unwrap_or_default().to_owned(),
        })]
    }
}

/// PING and PONG. The token is the trailing segment, or the first
/// parameter when there is none.
pub enum KeepaliveHandler {
    Ping,
    Pong,
}

impl Handler for KeepaliveHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let token = match ctx.opt_trailing().or_else(|| ctx.opt_param(0)) {
            Some(token) => token.to_owned(),
            None => ctx.trailing("token"),
        };
        let keepalive = Keepalive { token };
        vec![match self {
            Self::Ping => EventPayload::Ping(keepalive),
            Self::Pong => EventPayload::Pong(keepalive),
        }]
    }
}

/// `:tmi.twitch.tv CAP * ACK :twitch.tv/tags twitch.tv/commands`
pub struct CapHandler;

impl Handler for CapHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        let subcommand = ctx.param(1, "subcommand");
        let capabilities = ctx
            .opt_trailing()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        vec![EventPayload::Capability(Capability {
            subcommand,
            capabilities,
        })]
    }
}

/// RECONNECT: the server is about to restart.
pub struct ReconnectHandler;

impl Handler for ReconnectHandler {
    fn handle(&self, _ctx: &mut Context<'_>) -> Vec<EventPayload> {
        vec![EventPayload::Reconnect]
    }
}

/// Fallback for unclassified commands.
pub struct UnknownHandler;

impl Handler for UnknownHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> Vec<EventPayload> {
        vec![EventPayload::Unknown(Unknown {
            command: ctx.msg.command.clone(),
            text: ctx.msg.text().to_owned(),
        })]
    }
}
