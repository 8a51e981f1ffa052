//! Argument validation and wire form for chat commands.

use crate::error::{CommandFormatError, ValueError};

use super::values::{
    validate_free_text, validate_message_id, ChatColor, ChatDuration, CommercialLength, Login,
};
use super::{ArgKind, ArgSpec, ChatCommand};

/// Caller-specific encoding options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Allow `#RRGGBB` colours (Prime/Turbo accounts).
    pub privileged_colors: bool,
}

impl ChatCommand {
    /// Validate `args` against the usage grammar and produce the chat text.
    ///
    /// ```
    /// use tmi_proto::chat::{ChatCommand, EncodeOptions};
    ///
    /// let line = ChatCommand::Timeout
    ///     .encode(&["alice", "600", "spamming"], EncodeOptions::default())
    ///     .unwrap();
    /// assert_eq!(line, "/timeout alice 600 spamming");
    /// ```
    ///
    /// A [`ChatCommand::Other`] naming a fixed command is held to that
    /// command's grammar.
    pub fn encode(&self, args: &[&str], options: EncodeOptions) -> Result<String, CommandFormatError> {
        if let ChatCommand::Other(name) = self {
            let resolved = ChatCommand::from_name(name)
                .ok_or_else(|| CommandFormatError::InvalidName { name: name.clone() })?;
            if resolved != *self {
                return resolved.encode(args, options);
            }
        }

        let grammar = self.grammar();
        let mut line = format!("/{}", self.name());

        if let Some(max) = self.max_args() {
            if args.len() > max {
                return Err(CommandFormatError::TooManyArguments {
                    command: self.name().to_owned(),
                    max,
                    got: args.len(),
                });
            }
        }

        for (index, spec) in grammar.iter().enumerate() {
            if spec.kind == ArgKind::Text {
                let rest = args.get(index..).unwrap_or_default();
                if rest.is_empty() {
                    self.require(spec)?;
                    continue;
                }
                let text = rest.join(" ");
                validate_free_text(&text).map_err(|reason| self.invalid(spec, &text, reason))?;
                line.push(' ');
                line.push_str(text.trim());
                break;
            }

            let Some(raw) = args.get(index) else {
                self.require(spec)?;
                continue;
            };
            let value = self
                .render(spec, raw, options)
                .map_err(|reason| self.invalid(spec, raw, reason))?;
            line.push(' ');
            line.push_str(&value);
        }

        Ok(line)
    }

    fn render(&self, spec: &ArgSpec, raw: &str, options: EncodeOptions) -> Result<String, ValueError> {
        let value = match spec.kind {
            ArgKind::Login => Login::parse(raw)?.to_string(),
            ArgKind::MessageId => {
                validate_message_id(raw)?;
                raw.to_owned()
            }
            ArgKind::Duration(bounds) => ChatDuration::parse(raw, bounds)?.to_string(),
            ArgKind::Color => ChatColor::parse(raw, options.privileged_colors)?.to_string(),
            ArgKind::CommercialLength => raw.parse::<CommercialLength>()?.to_string(),
            ArgKind::Text => {
                validate_free_text(raw)?;
                raw.to_owned()
            }
        };
        Ok(value)
    }

    fn require(&self, spec: &ArgSpec) -> Result<(), CommandFormatError> {
        if spec.required {
            Err(CommandFormatError::MissingArgument {
                command: self.name().to_owned(),
                argument: spec.name,
            })
        } else {
            Ok(())
        }
    }

    fn invalid(&self, spec: &ArgSpec, value: &str, reason: ValueError) -> CommandFormatError {
        CommandFormatError::InvalidArgument {
            command: self.name().to_owned(),
            argument: spec.name,
            value: value.to_owned(),
            reason,
        }
    }
}
