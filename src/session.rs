//! One chat connection: lifecycle, handshake, inbound loop and sends.
//!
//! A [`Session`] does not own a socket. The caller opens one, hands the
//! write half to [`Session::new`] as a [`Transport`] and feeds the framed
//! read half to [`Session::run`]. Reconnection is the caller's business:
//! watch [`Session::subscribe_state`] and call [`Session::connect`] again
//! once the state is back to `Disconnected`.

use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

use tmi_proto::{ChatCommand, EncodeOptions, Message, ProtocolError};

use crate::config::Config;
use crate::error::{EngineError, EngineResult, InvalidTransition, MalformedMessage, SendError};
use crate::event::EventPayload;
use crate::handlers::{Dispatch, Dispatcher};
use crate::outbound::{Outbound, Transport};
use crate::state::{ConnectionState, ConnectionStateMachine};
use crate::subscriber::{Subscriber, Subscribers};
use crate::telemetry::spans;

/// A chat connection.
pub struct Session {
    config: Config,
    state: ConnectionStateMachine,
    dispatcher: parking_lot::Mutex<Dispatcher>,
    outbound: Outbound,
    subscribers: Subscribers,
    shutdown: CancellationToken,
}

impl Session {
    pub fn new(config: Config, transport: Box<dyn Transport>) -> Self {
        let outbound = Outbound::new(transport, &config.rate_limit);
        Self {
            config,
            state: ConnectionStateMachine::new(),
            dispatcher: parking_lot::Mutex::new(Dispatcher::new()),
            outbound,
            subscribers: Subscribers::new(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.state.current()
    }

    /// Receiver that observes every state change.
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) {
        self.subscribers.add(subscriber);
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Start a connection attempt and send the login handshake.
    ///
    /// The state becomes `Connected` when the server's welcome arrives.
    pub async fn connect(&self) -> EngineResult<()> {
        self.state.connect()?;
        self.dispatcher.lock().reset();

        let identity = &self.config.identity;
        async {
            if let Some(pass) = identity.pass() {
                self.send_protocol(&Message::pass(pass)).await?;
            }
            self.send_protocol(&Message::nick(identity.nick.as_str()))
                .await?;
            let caps = &self.config.channels.capabilities;
            if !caps.is_empty() {
                self.send_protocol(&Message::cap_req(caps.iter().map(String::as_str)))
                    .await?;
            }
            info!(capabilities = caps.len(), "handshake sent");
            Ok(())
        }
        .instrument(spans::session(&identity.nick))
        .await
    }

    /// Begin a graceful disconnect. The caller closes the transport, then
    /// calls [`closed`](Self::closed) (or lets [`run`](Self::run) see the end
    /// of input).
    pub fn disconnect(&self) -> Result<(), InvalidTransition> {
        self.state.disconnect().map(drop)
    }

    /// The transport has closed.
    pub fn closed(&self) -> Result<(), InvalidTransition> {
        self.state.closed().map(drop)
    }

    /// Shut the session down for good.
    ///
    /// Stops [`run`](Self::run), waits for an in-flight dispatch to finish
    /// and drops subscribers. Returns `false` if the session was already
    /// disposing or disposed.
    pub fn dispose(&self) -> bool {
        self.shutdown.cancel();
        if !self.state.dispose() {
            return false;
        }

        // Taking the lock waits out a line that is being decoded.
        self.dispatcher.lock().reset();
        self.subscribers.clear();

        if let Err(error) = self.state.cleanup_done() {
            warn!(%error, "dispose cleanup raced another transition");
        }
        true
    }

    // ------------------------------------------------------------------
    // Inbound
    // ------------------------------------------------------------------

    /// Decode one line and deliver its events.
    ///
    /// Lines arriving outside `Connecting`, `Connected` or `Disconnecting`
    /// are ignored. A malformed line is reported to subscribers and
    /// returned; it does not affect the connection.
    pub async fn handle_line(&self, line: &str) -> Result<Dispatch, MalformedMessage> {
        let result = {
            let mut dispatcher = self.dispatcher.lock();
            let state = self.state.current();
            if !state.accepts_inbound() {
                debug!(%state, "ignoring inbound line");
                return Ok(Dispatch::default());
            }
            dispatcher.dispatch(line)
        };

        match result {
            Ok(dispatch) => {
                self.react(&dispatch).await;
                self.subscribers.notify(&dispatch);
                Ok(dispatch)
            }
            Err(malformed) => {
                warn!(error = %malformed, "dropping malformed line");
                self.subscribers.malformed(&malformed);
                Err(malformed)
            }
        }
    }

    /// Protocol duties: complete the login and answer keepalives.
    async fn react(&self, dispatch: &Dispatch) {
        for event in &dispatch.events {
            match event.payload() {
                EventPayload::Welcome(_) if self.state() == ConnectionState::Connecting => {
                    if self.state.established().is_ok() {
                        info!("logged in");
                        self.join_configured().await;
                    }
                }
                EventPayload::Ping(ping) => {
                    if let Err(error) = self.send_protocol(&Message::pong(ping.token.as_str())).await {
                        warn!(%error, code = error.error_code(), "failed to answer PING");
                    }
                }
                EventPayload::Reconnect => {
                    info!("server requested reconnect");
                }
                _ => {}
            }
        }
    }

    async fn join_configured(&self) {
        for channel in self.config.channels.normalized_join() {
            if let Err(error) = self.join(&channel).await {
                warn!(channel = %channel, %error, "failed to join");
            }
        }
    }

    /// Feed framed lines until input ends or the session is disposed.
    ///
    /// Unreadable frames are reported and skipped. A framed reader yields one
    /// `None` after a decode error and then resumes, so that `None` does not
    /// end the loop. When the loop ends for any reason other than dispose, a
    /// live connection counts as dropped: the state moves through
    /// `Disconnecting` back to `Disconnected`. Only a transport failure ends
    /// the loop with an error.
    pub async fn run<S>(&self, lines: S) -> EngineResult<()>
    where
        S: Stream<Item = Result<String, ProtocolError>> + Unpin,
    {
        let result = self.read_lines(lines).await;
        if !self.shutdown.is_cancelled() {
            self.input_ended();
        }
        result
    }

    async fn read_lines<S>(&self, mut lines: S) -> EngineResult<()>
    where
        S: Stream<Item = Result<String, ProtocolError>> + Unpin,
    {
        let mut resuming = false;
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    debug!("run loop cancelled");
                    return Ok(());
                }
                next = lines.next() => match next {
                    Some(Ok(line)) => {
                        resuming = false;
                        // Malformed lines were already reported.
                        let _ = self.handle_line(&line).await;
                    }
                    Some(Err(error)) if error.is_malformed() => {
                        resuming = true;
                        warn!(%error, "dropping unreadable frame");
                        self.subscribers.malformed(&MalformedMessage::new(String::new(), error));
                    }
                    Some(Err(error)) => return Err(EngineError::Inbound(error)),
                    None if resuming => resuming = false,
                    None => return Ok(()),
                },
            }
        }
    }

    fn input_ended(&self) {
        let state = self.state();
        if matches!(state, ConnectionState::Connecting | ConnectionState::Connected) {
            info!(%state, "connection lost");
            if let Err(error) = self.state.disconnect() {
                debug!(%error, "state moved on before disconnect");
            }
        }
        if self.state() == ConnectionState::Disconnecting {
            if let Err(error) = self.state.closed() {
                debug!(%error, "state moved on before close");
            }
        }
    }

    // ------------------------------------------------------------------
    // Outbound
    // ------------------------------------------------------------------

    async fn send_protocol(&self, message: &Message) -> Result<(), SendError> {
        self.outbound
            .send_protocol(&message.to_string(), &self.state)
            .await
    }

    pub async fn join(&self, channel: &str) -> Result<(), SendError> {
        self.send_protocol(&Message::join(channel)).await
    }

    pub async fn part(&self, channel: &str) -> Result<(), SendError> {
        self.send_protocol(&Message::part(channel)).await
    }

    /// Send chat text to a channel. Requires `Connected`, including after
    /// any wait for the pacing gate.
    pub async fn send_message(&self, channel: &str, text: &str) -> Result<(), SendError> {
        let line = Message::privmsg(channel, text).to_string();
        self.outbound.send_chat(channel, &line, &self.state).await
    }

    /// Validate, encode and send a chat command.
    ///
    /// Nothing is sent when the arguments do not fit the command's grammar.
    pub async fn send_command(
        &self,
        channel: &str,
        command: &ChatCommand,
        args: &[&str],
    ) -> Result<(), SendError> {
        let options = EncodeOptions {
            privileged_colors: self.config.identity.privileged_colors,
        };
        let text = command.encode(args, options)?;
        self.send_message(channel, &text).await
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
