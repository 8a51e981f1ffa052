//! `FromStr` for [`Message`] on top of the nom tokenizer.

use std::str::FromStr;

use crate::error::{MessageParseError, ProtocolError};
use crate::prefix::Prefix;

use super::nom_parser::ParsedMessage;
use super::tags::Tags;
use super::types::Message;

/// Pick the most specific tokenizer error for a failed line.
fn classify_failure(line: &str, position: usize) -> MessageParseError {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.starts_with('@') && !line.contains(' ') {
        return MessageParseError::UnterminatedTags;
    }

    let after_tags = if line.starts_with('@') {
        line.split_once(' ').map_or("", |(_, rest)| rest).trim_start()
    } else {
        line
    };
    if after_tags.starts_with(':') && !after_tags.trim_end().contains(' ') {
        return MessageParseError::UnterminatedOrigin;
    }

    if position >= line.len() {
        MessageParseError::MissingCommand
    } else {
        MessageParseError::ParseContext {
            position,
            context: "expected command token".to_owned(),
        }
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        if s.trim().is_empty() {
            return Err(ProtocolError::InvalidMessage {
                string: s.to_owned(),
                cause: MessageParseError::EmptyMessage,
            });
        }

        let parsed = ParsedMessage::parse(s).map_err(|parse_err| ProtocolError::InvalidMessage {
            string: s.to_owned(),
            cause: classify_failure(s, parse_err.position),
        })?;

        Ok(Message {
            tags: parsed.tags.map(Tags::parse).unwrap_or_default(),
            prefix: parsed.prefix.map(Prefix::new_from_str),
            command: parsed.command.to_owned(),
            params: parsed.params.iter().map(|p| (*p).to_owned()).collect(),
            trailing: parsed.trailing.map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MessageKind;
    use crate::response::Response;

    #[test]
    fn test_parse_simple_ping() {
        let msg: Message = "PING :tmi.twitch.tv\r\n".parse().unwrap();
        assert_eq!(msg.kind(), MessageKind::Ping);
        assert_eq!(msg.trailing.as_deref(), Some("tmi.twitch.tv"));
    }

    #[test]
    fn test_parse_privmsg() {
        let msg: Message = ":ada!ada@ada.tmi.twitch.tv PRIVMSG #ada :Hello, world!"
            .parse()
            .unwrap();
        assert_eq!(msg.kind(), MessageKind::PrivMsg);
        assert_eq!(msg.source_nickname(), Some("ada"));
    }

    #[test]
    fn test_parse_with_tags() {
        let msg: Message = "@tmi-sent-ts=1507246572675;id=abc123 :nick PRIVMSG #ch :Hi"
            .parse()
            .unwrap();
        assert_eq!(msg.tags.len(), 2);
        assert_eq!(msg.tag("id"), Some("abc123"));
    }

    #[test]
    fn test_parse_escaped_tags() {
        let msg: Message = "@system-msg=value\\swith\\sspace USERNOTICE #ch".parse().unwrap();
        assert_eq!(msg.tag("system-msg"), Some("value with space"));
    }

    #[test]
    fn test_absent_versus_empty() {
        let msg: Message = "JOIN #ch".parse().unwrap();
        assert!(msg.tags.is_empty());
        assert!(msg.prefix.is_none());
        assert!(msg.trailing.is_none());

        let msg: Message = "PRIVMSG #ch :".parse().unwrap();
        assert_eq!(msg.trailing.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_empty_message() {
        let result: Result<Message, _> = "".parse();
        assert!(matches!(
            result,
            Err(ProtocolError::InvalidMessage {
                cause: MessageParseError::EmptyMessage,
                ..
            })
        ));

        let result: Result<Message, _> = "   \r\n".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_unterminated_segments() {
        let err = "@badges=".parse::<Message>().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidMessage {
                cause: MessageParseError::UnterminatedTags,
                ..
            }
        ));

        let err = "@a=b :tmi.twitch.tv".parse::<Message>().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidMessage {
                cause: MessageParseError::UnterminatedOrigin,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_numeric_response() {
        let msg: Message = ":tmi.twitch.tv 001 justinfan :Welcome, GLHF!".parse().unwrap();
        assert_eq!(msg.kind(), MessageKind::Numeric(Response::RPL_WELCOME));
        assert!(msg.is_numeric());
    }

    #[test]
    fn test_parse_unknown_command_is_not_an_error() {
        let msg: Message = ":tmi.twitch.tv FROBNICATE #ch :what".parse().unwrap();
        assert_eq!(msg.kind(), MessageKind::Unknown);
        assert_eq!(msg.command, "FROBNICATE");
    }
}
