//! Session inbound loop and outbound command tests.

mod common;

use std::time::Duration;

use common::{WELCOME, config_with, session};
use futures_util::stream;
use tmi_engine::error::SendError;
use tmi_engine::{ConnectionState, EventKind, EventPayload};
use tmi_proto::{ChatCommand, CommandFormatError, ProtocolError};
use tokio_util::codec::FramedRead;

fn lines(raw: &[&str]) -> impl futures_util::Stream<Item = Result<String, ProtocolError>> + Unpin {
    stream::iter(
        raw.iter()
            .map(|l| Ok(l.to_string()))
            .collect::<Vec<_>>(),
    )
}

#[tokio::test]
async fn ping_is_answered_with_same_token() {
    let (session, transport, recorder) = session(config_with("adabot", None, &[]));
    session.connect().await.unwrap();
    transport.take();

    session.handle_line("PING :tmi.twitch.tv").await.unwrap();
    assert_eq!(transport.take(), ["PONG :tmi.twitch.tv"]);
    assert_eq!(recorder.kinds(), [EventKind::Ping]);
}

#[tokio::test]
async fn malformed_lines_do_not_stop_the_loop() {
    let (session, _, recorder) = session(config_with("adabot", None, &[]));
    session.connect().await.unwrap();

    session
        .run(lines(&[
            WELCOME,
            "",
            "@only=tags",
            ":ada!ada@ada.tmi.twitch.tv PRIVMSG #ada :still flowing",
        ]))
        .await
        .unwrap();

    assert_eq!(recorder.malformed.lock().len(), 2);
    assert_eq!(
        recorder.kinds(),
        [EventKind::Welcome, EventKind::PrivateMessage]
    );
    // End of input while connected drops back to Disconnected.
    assert_eq!(session.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn run_over_framed_bytes() {
    let (session, transport, recorder) = session(config_with("adabot", None, &["ada"]));
    session.connect().await.unwrap();
    transport.take();

    let capture: &[u8] = b":tmi.twitch.tv 001 adabot :Welcome, GLHF!\r\n\
        :adabot!adabot@adabot.tmi.twitch.tv JOIN #ada\r\n\
        :adabot.tmi.twitch.tv 353 adabot = #ada :adabot\r\n\
        :adabot.tmi.twitch.tv 366 adabot #ada :End of /NAMES list\r\n\
        @emote-only=0;followers-only=-1;r9k=0;room-id=1337;slow=0;subs-only=0 :tmi.twitch.tv ROOMSTATE #ada\r\n";
    let framed = FramedRead::new(capture, tmi_proto::LineCodec::new());

    session.run(framed).await.unwrap();

    assert_eq!(
        recorder.kinds(),
        [
            EventKind::Welcome,
            EventKind::Join,
            EventKind::NamesReply,
            EventKind::EndOfNames,
            EventKind::RoomState,
        ]
    );
    assert_eq!(transport.take(), ["JOIN #ada"]);
}

#[tokio::test]
async fn overlong_line_is_skipped() {
    let (session, _, recorder) = session(config_with("adabot", None, &[]));
    session.connect().await.unwrap();

    let long = format!(":a!a@a PRIVMSG #ada :{}", "x".repeat(200));
    let capture = format!("{WELCOME}\r\n{long}\r\n:a!a@a PRIVMSG #ada :after\r\n");
    let framed = FramedRead::new(capture.as_bytes(), tmi_proto::LineCodec::with_max_len(100));

    session.run(framed).await.unwrap();

    assert_eq!(
        recorder.kinds(),
        [EventKind::Welcome, EventKind::PrivateMessage]
    );
    assert_eq!(recorder.malformed.lock().len(), 1);
    assert_eq!(session.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn transport_failure_ends_run_and_drops_connection() {
    let (session, _, _) = session(config_with("adabot", None, &[]));
    session.connect().await.unwrap();
    session.handle_line(WELCOME).await.unwrap();

    let failing = stream::iter(vec![Err(ProtocolError::from(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "reset",
    )))]);
    let err = session.run(failing).await.unwrap_err();

    assert_eq!(err.error_code(), "inbound");
    assert_eq!(session.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn incomplete_lines_are_reported_and_delivered() {
    let (session, _, recorder) = session(config_with("adabot", None, &[]));
    session.connect().await.unwrap();
    session.handle_line("@msg-id=raid :tmi.twitch.tv USERNOTICE #ada").await.unwrap();

    let incomplete = recorder.incomplete.lock();
    assert_eq!(incomplete.len(), 1);
    assert_eq!(incomplete[0].kind, EventKind::UserNotice);
    assert_eq!(incomplete[0].missing, ["msg-param-viewerCount"]);
    assert_eq!(recorder.kinds(), [EventKind::UserNotice]);
}

#[tokio::test]
async fn commands_are_encoded_and_sent() {
    let (session, transport, _) = session(config_with("adabot", None, &[]));
    session.connect().await.unwrap();
    session.handle_line(WELCOME).await.unwrap();
    transport.take();

    session
        .send_command("#ada", &ChatCommand::Timeout, &["alice", "600", "spamming"])
        .await
        .unwrap();
    session.send_message("#ada", "hello chat").await.unwrap();
    assert_eq!(
        transport.take(),
        [
            "PRIVMSG #ada :/timeout alice 600 spamming",
            "PRIVMSG #ada :hello chat",
        ]
    );
}

#[tokio::test]
async fn bad_command_sends_nothing() {
    let (session, transport, _) = session(config_with("adabot", None, &[]));
    session.connect().await.unwrap();
    session.handle_line(WELCOME).await.unwrap();
    transport.take();

    let err = session
        .send_command("#ada", &ChatCommand::Timeout, &[])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SendError::Format(CommandFormatError::MissingArgument { .. })
    ));

    let err = session
        .send_command("#ada", &ChatCommand::Color, &["#FF0000"])
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "command_format");
    assert!(transport.lines().is_empty());
}

#[tokio::test]
async fn chat_waiting_on_pacer_is_not_sent_after_close() {
    let mut config = config_with("adabot", None, &[]);
    config.rate_limit.messages = 1;
    config.rate_limit.window_secs = 1;
    let (session, transport, _) = session(config);
    session.connect().await.unwrap();
    session.handle_line(WELCOME).await.unwrap();
    transport.take();

    session.send_message("#ada", "one").await.unwrap();
    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.send_message("#ada", "two").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    session.disconnect().unwrap();
    session.closed().unwrap();

    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(
        err,
        SendError::NotConnected(ConnectionState::Disconnected)
    ));
    assert_eq!(transport.take(), ["PRIVMSG #ada :one"]);
}

#[tokio::test]
async fn dispose_cancels_a_pending_run() {
    let (session, _, _) = session(config_with("adabot", None, &[]));
    session.connect().await.unwrap();

    let runner = {
        let session = session.clone();
        tokio::spawn(async move { session.run(stream::pending()).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(session.dispose());
    let result = tokio::time::timeout(Duration::from_secs(1), runner)
        .await
        .expect("run loop did not stop");
    assert!(result.unwrap().is_ok());
    assert_eq!(session.state(), ConnectionState::Disposed);
}

#[tokio::test]
async fn privmsg_payload_reaches_subscriber() {
    let (session, _, recorder) = session(config_with("adabot", None, &[]));
    session.connect().await.unwrap();
    session
        .handle_line(
            "@badges=moderator/1;color=#8A2BE2;display-name=Grace \
             :grace!grace@grace.tmi.twitch.tv PRIVMSG #ada :hi Ada",
        )
        .await
        .unwrap();

    let events = recorder.events.lock();
    let EventPayload::PrivateMessage(msg) = events[0].payload() else {
        panic!("expected PrivateMessage");
    };
    assert_eq!(msg.display_name, "Grace");
    assert_eq!(msg.color.as_deref(), Some("#8A2BE2"));
    assert!(msg.has_badge("moderator"));
    assert_eq!(events[0].raw().command, "PRIVMSG");
}
