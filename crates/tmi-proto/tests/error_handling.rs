//! Integration tests for error handling scenarios
//!
//! These tests verify that malformed lines are rejected with a useful
//! error and that lines the tokenizer accepts re-serialize cleanly.

use tmi_proto::{Message, MessageParseError, ProtocolError};

fn parse_cause(raw: &str) -> MessageParseError {
    match raw.parse::<Message>() {
        Err(ProtocolError::InvalidMessage { cause, .. }) => cause,
        other => panic!("expected InvalidMessage for {:?}, got {:?}", raw, other),
    }
}

#[test]
fn test_parse_error_context() {
    let long_prefix = ":toolong!".repeat(100);
    let candidates = vec![
        ("", "empty message"),
        ("   \r\n", "whitespace only"),
        ("@invalid-tag-format", "tags without command"),
        (long_prefix.as_str(), "prefix without command"),
        ("COMMAND \x01\x02\x03", "control characters in parameters"),
    ];

    for (raw, description) in candidates {
        match raw.parse::<Message>() {
            Ok(msg) => {
                let serialized = msg.to_string();
                let reparsed: Message = serialized
                    .parse()
                    .unwrap_or_else(|e| panic!("{} should round-trip: {}", description, e));
                assert_eq!(reparsed, msg, "{}", description);
            }
            Err(err) => {
                assert!(err.is_malformed(), "{}", description);
                assert!(!err.to_string().is_empty(), "{}", description);
            }
        }
    }
}

#[test]
fn test_empty_line_is_malformed() {
    assert_eq!(parse_cause(""), MessageParseError::EmptyMessage);
    assert_eq!(parse_cause("\r\n"), MessageParseError::EmptyMessage);
}

#[test]
fn test_unterminated_tags() {
    assert_eq!(parse_cause("@badges=moderator/1"), MessageParseError::UnterminatedTags);
}

#[test]
fn test_unterminated_origin() {
    assert_eq!(parse_cause(":tmi.twitch.tv"), MessageParseError::UnterminatedOrigin);
    assert_eq!(
        parse_cause("@a=b :tmi.twitch.tv"),
        MessageParseError::UnterminatedOrigin
    );
}

#[test]
fn test_error_keeps_original_line() {
    match "@a=b".parse::<Message>() {
        Err(ProtocolError::InvalidMessage { string, .. }) => assert_eq!(string, "@a=b"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_odd_but_valid_lines() {
    let msg: Message = "PING".parse().unwrap();
    assert!(msg.params.is_empty());
    assert_eq!(msg.trailing, None);

    let msg: Message = "PRIVMSG #a :".parse().unwrap();
    assert_eq!(msg.trailing.as_deref(), Some(""));

    let msg: Message = "FROB a  b   c".parse().unwrap();
    assert_eq!(msg.params, vec!["a", "b", "c"]);
}
