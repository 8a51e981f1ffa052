//! tmi-replay - feed a captured chat session through the engine.
//!
//! Usage: `tmi-replay [config.toml] [capture.log]`. Reads CRLF-framed lines
//! from the capture file (stdin when omitted), writes every line the engine
//! would send to stdout and logs each decoded event.

use std::sync::Arc;

use tmi_engine::error::{IncompleteFields, MalformedMessage};
use tmi_engine::event::{Event, EventPayload};
use tmi_engine::{Config, LineSink, Session, Subscriber};
use tmi_proto::LineCodec;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Logs every event at info level.
struct EventLog;

impl Subscriber for EventLog {
    fn on_event(&self, event: &Event) {
        match event.payload() {
            EventPayload::PrivateMessage(msg) => info!(
                channel = %msg.channel,
                user = %msg.display_name,
                body = %msg.body,
                "chat"
            ),
            payload => info!(
                kind = %event.kind(),
                channel = payload.channel().unwrap_or("-"),
                "event"
            ),
        }
    }

    fn on_malformed(&self, error: &MalformedMessage) {
        warn!(line = %error.line, error = %error.source, "malformed line");
    }

    fn on_incomplete(&self, report: &IncompleteFields) {
        warn!(kind = %report.kind, missing = ?report.missing, "incomplete line");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.toml".to_string());
    let capture_path = args.next();

    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).map_err(|e| {
            error!(path = %config_path, error = %e, "Failed to load config");
            e
        })?
    } else {
        warn!(path = %config_path, "config not found, using defaults");
        Config::default()
    };

    let input: Box<dyn AsyncRead + Unpin + Send> = match &capture_path {
        Some(path) => Box::new(tokio::fs::File::open(path).await?),
        None => Box::new(tokio::io::stdin()),
    };
    let lines = FramedRead::new(
        input,
        LineCodec::with_max_len(config.transport.max_line_len),
    );

    info!(
        nick = %config.identity.nick,
        channels = config.channels.join.len(),
        capture = capture_path.as_deref().unwrap_or("<stdin>"),
        "Starting replay"
    );

    let session = Arc::new(Session::new(
        config,
        Box::new(LineSink::new(tokio::io::stdout())),
    ));
    session.subscribe(Arc::new(EventLog));
    session.connect().await?;

    let runner = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.run(lines).await })
    };

    tokio::select! {
        result = runner => {
            if let Err(e) = result? {
                error!(error = %e, code = e.error_code(), "replay failed");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C");
        }
    }

    session.dispose();
    info!(state = %session.state(), "Replay finished");
    Ok(())
}
