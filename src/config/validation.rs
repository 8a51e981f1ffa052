//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;
use tmi_proto::chat::Login;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("identity.nick is required")]
    MissingNick,
    #[error("identity.nick is not a valid login: {0:?}")]
    InvalidNick(String),
    #[error("channels.join entry is not a valid channel: {0:?}")]
    InvalidChannel(String),
    #[error("rate_limit.messages must be greater than zero")]
    ZeroMessages,
    #[error("rate_limit.window_secs must be greater than zero")]
    ZeroWindow,
    #[error("transport.max_line_len must be at least 512, got {0}")]
    LineTooShort(usize),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let nick = &config.identity.nick;
    if nick.is_empty() {
        errors.push(ValidationError::MissingNick);
    } else if Login::parse(nick).is_err() {
        errors.push(ValidationError::InvalidNick(nick.clone()));
    }

    for channel in &config.channels.join {
        if Login::parse(channel.trim()).is_err() {
            errors.push(ValidationError::InvalidChannel(channel.clone()));
        }
    }

    if config.rate_limit.messages == 0 {
        errors.push(ValidationError::ZeroMessages);
    }
    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError::ZeroWindow);
    }

    // 512 is the classic IRC line length; anything shorter truncates tags.
    if config.transport.max_line_len < 512 {
        errors.push(ValidationError::LineTooShort(
            config.transport.max_line_len,
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = Config::default();
        config.identity.nick = "bad nick".into();
        config.channels.join = vec!["#ok".into(), "#not ok".into()];
        config.rate_limit.messages = 0;
        config.rate_limit.window_secs = 0;
        config.transport.max_line_len = 100;

        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(matches!(errors[0], ValidationError::InvalidNick(_)));
    }
}
