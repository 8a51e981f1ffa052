//! Outbound line path: pacing, serialisation and the transport seam.
//!
//! One write is in flight per connection. Chat lines wait on a `governor`
//! limiter before taking the write lock; protocol lines (handshake, JOIN,
//! PONG) skip pacing. The connection state is checked again once the write
//! lock is held, so a line that waited out a disconnect is never written.

use std::io;

use async_trait::async_trait;
use futures_util::SinkExt;
use governor::{DefaultDirectRateLimiter, RateLimiter};
use tokio::io::AsyncWrite;
use tokio::sync::Mutex;
use tokio_util::codec::FramedWrite;
use tracing::{Instrument, trace};

use tmi_proto::{LineCodec, ProtocolError};

use crate::config::RateLimitConfig;
use crate::error::SendError;
use crate::state::{ConnectionState, ConnectionStateMachine};
use crate::telemetry::spans;

/// Where formatted lines go. Lines are passed without their CRLF.
#[async_trait]
pub trait Transport: Send {
    async fn send_line(&mut self, line: &str) -> io::Result<()>;
}

/// [`Transport`] over any async writer, framed with [`LineCodec`].
pub struct LineSink<W> {
    inner: FramedWrite<W, LineCodec>,
}

impl<W: AsyncWrite + Unpin> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: FramedWrite::new(writer, LineCodec::new()),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Transport for LineSink<W> {
    async fn send_line(&mut self, line: &str) -> io::Result<()> {
        self.inner.send(line).await.map_err(|e| match e {
            ProtocolError::Io(io) => io,
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        })
    }
}

fn gate(
    state: &ConnectionStateMachine,
    allowed: fn(ConnectionState) -> bool,
) -> Result<(), SendError> {
    let current = state.current();
    if allowed(current) {
        Ok(())
    } else {
        Err(SendError::NotConnected(current))
    }
}

fn check_line(line: &str) -> Result<(), ProtocolError> {
    match line.chars().find(|c| matches!(c, '\0' | '\r' | '\n')) {
        Some(c) => Err(ProtocolError::IllegalControlChar(c)),
        None => Ok(()),
    }
}

/// Paced, serialised writer for one connection.
pub struct Outbound {
    transport: Mutex<Box<dyn Transport>>,
    limiter: DefaultDirectRateLimiter,
}

impl Outbound {
    pub fn new(transport: Box<dyn Transport>, rate: &RateLimitConfig) -> Self {
        Self {
            transport: Mutex::new(transport),
            limiter: RateLimiter::direct(rate.quota()),
        }
    }

    /// Send a protocol line without pacing. Requires `Connecting` or
    /// `Connected`.
    pub async fn send_protocol(
        &self,
        line: &str,
        state: &ConnectionStateMachine,
    ) -> Result<(), SendError> {
        self.write(line, state, ConnectionState::accepts_protocol)
            .instrument(spans::send("protocol", None))
            .await
    }

    /// Send a chat line, waiting for the pacing gate first. Requires
    /// `Connected` both before and after the wait.
    pub async fn send_chat(
        &self,
        channel: &str,
        line: &str,
        state: &ConnectionStateMachine,
    ) -> Result<(), SendError> {
        check_line(line)?;
        async {
            gate(state, ConnectionState::accepts_chat)?;
            self.limiter.until_ready().await;
            self.write(line, state, ConnectionState::accepts_chat).await
        }
        .instrument(spans::send("chat", Some(channel)))
        .await
    }

    async fn write(
        &self,
        line: &str,
        state: &ConnectionStateMachine,
        allowed: fn(ConnectionState) -> bool,
    ) -> Result<(), SendError> {
        check_line(line)?;
        let mut transport = self.transport.lock().await;
        gate(state, allowed)?;
        transport.send_line(line).await?;
        trace!(line, "sent");
        Ok(())
    }
}
