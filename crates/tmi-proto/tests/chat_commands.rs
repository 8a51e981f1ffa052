//! Slash-command grammar tests against the public API.

use tmi_proto::chat::{ArgKind, ChatCommand, EncodeOptions};
use tmi_proto::{CommandFormatError, Message, MessageKind, ValueError};

fn encode(command: &ChatCommand, args: &[&str]) -> Result<String, CommandFormatError> {
    command.encode(args, EncodeOptions::default())
}

#[test]
fn test_timeout_examples() {
    assert_eq!(
        encode(&ChatCommand::Timeout, &["alice", "600", "spamming"]).unwrap(),
        "/timeout alice 600 spamming"
    );
    assert_eq!(encode(&ChatCommand::Timeout, &["alice"]).unwrap(), "/timeout alice");
    assert!(matches!(
        encode(&ChatCommand::Timeout, &[]),
        Err(CommandFormatError::MissingArgument { argument: "user", .. })
    ));
}

#[test]
fn test_every_command_rejects_missing_required_arguments() {
    for command in ChatCommand::all() {
        let required = command.min_args();
        if required == 0 {
            assert!(encode(command, &[]).is_ok(), "{} should accept no args", command);
        } else {
            let err = encode(command, &[]).unwrap_err();
            assert!(
                matches!(err, CommandFormatError::MissingArgument { .. }),
                "{} gave {:?}",
                command,
                err
            );
        }
    }
}

#[test]
fn test_every_login_argument_rejects_spaces() {
    for command in ChatCommand::all() {
        if command.grammar().first().map(|a| a.kind) != Some(ArgKind::Login) {
            continue;
        }
        let err = encode(command, &["two words"]).unwrap_err();
        assert!(
            matches!(
                err,
                CommandFormatError::InvalidArgument {
                    reason: ValueError::IllegalChar(' '),
                    ..
                }
            ),
            "{} gave {:?}",
            command,
            err
        );
    }
}

#[test]
fn test_encoded_command_travels_as_privmsg_body() {
    let body = encode(&ChatCommand::Ban, &["alice", "rule", "3"]).unwrap();
    let line = Message::privmsg("#ada", body).to_string();
    assert_eq!(line, "PRIVMSG #ada :/ban alice rule 3");

    let reparsed: Message = line.parse().unwrap();
    assert_eq!(reparsed.kind(), MessageKind::PrivMsg);
    assert_eq!(reparsed.text(), "/ban alice rule 3");
}

#[test]
fn test_usage_lines_name_every_argument() {
    for command in ChatCommand::all() {
        let usage = command.usage();
        assert!(usage.starts_with(&format!("/{}", command.name())));
        for arg in command.grammar() {
            assert!(usage.contains(arg.name), "{} misses {}", usage, arg.name);
        }
    }
}
