//! Shared helpers for session-level tests.

#![allow(dead_code)]

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tmi_engine::error::{IncompleteFields, MalformedMessage};
use tmi_engine::{Config, Event, EventKind, Session, Subscriber, Transport};

/// Transport that records every line it is asked to send.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingTransport {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.lock().push(line.to_owned());
        Ok(())
    }
}

/// Subscriber that keeps everything it is given.
#[derive(Default)]
pub struct Recorder {
    pub events: Mutex<Vec<Event>>,
    pub malformed: Mutex<Vec<MalformedMessage>>,
    pub incomplete: Mutex<Vec<IncompleteFields>>,
}

impl Recorder {
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().iter().map(Event::kind).collect()
    }
}

impl Subscriber for Recorder {
    fn on_event(&self, event: &Event) {
        self.events.lock().push(event.clone());
    }

    fn on_malformed(&self, error: &MalformedMessage) {
        self.malformed.lock().push(error.clone());
    }

    fn on_incomplete(&self, report: &IncompleteFields) {
        self.incomplete.lock().push(report.clone());
    }
}

/// Session over a recording transport with a recorder subscribed.
pub fn session(config: Config) -> (Arc<Session>, RecordingTransport, Arc<Recorder>) {
    let transport = RecordingTransport::default();
    let session = Arc::new(Session::new(config, Box::new(transport.clone())));
    let recorder = Arc::new(Recorder::default());
    session.subscribe(recorder.clone());
    (session, transport, recorder)
}

pub fn config_with(nick: &str, token: Option<&str>, join: &[&str]) -> Config {
    let mut config = Config::default();
    config.identity.nick = nick.to_string();
    config.identity.token = token.map(str::to_string);
    config.channels.join = join.iter().map(|c| c.to_string()).collect();
    config
}

pub const WELCOME: &str = ":tmi.twitch.tv 001 adabot :Welcome, GLHF!";
