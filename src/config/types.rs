//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::limits::{RateLimitConfig, TransportConfig};
use super::validation::{self, ValidationError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join(.0))]
    Invalid(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Who we log in as.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Channels to join and capabilities to request.
    #[serde(default)]
    pub channels: ChannelsConfig,
    /// Outbound chat pacing.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Line framing.
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Run the startup checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self).map_err(ConfigError::Invalid)
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Login identity.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Login name sent with NICK (default: an anonymous `justinfan` login).
    #[serde(default = "default_nick")]
    pub nick: String,
    /// OAuth token sent with PASS; anonymous logins have none.
    #[serde(default)]
    pub token: Option<String>,
    /// Whether `#RRGGBB` chat colours may be used (paid accounts).
    #[serde(default)]
    pub privileged_colors: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            nick: default_nick(),
            token: None,
            privileged_colors: false,
        }
    }
}

impl IdentityConfig {
    /// PASS argument, with the `oauth:` prefix added when missing.
    pub fn pass(&self) -> Option<String> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        if token.starts_with("oauth:") {
            Some(token.to_owned())
        } else {
            Some(format!("oauth:{token}"))
        }
    }
}

/// Channels and capabilities.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelsConfig {
    /// Joined after the welcome reply.
    #[serde(default)]
    pub join: Vec<String>,
    /// Requested with CAP REQ during the handshake.
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<String>,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            join: Vec::new(),
            capabilities: default_capabilities(),
        }
    }
}

impl ChannelsConfig {
    /// Join list with a leading `#` on every entry.
    pub fn normalized_join(&self) -> Vec<String> {
        self.join
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(|c| {
                if c.starts_with('#') {
                    c.to_ascii_lowercase()
                } else {
                    format!("#{}", c.to_ascii_lowercase())
                }
            })
            .collect()
    }
}

fn default_nick() -> String {
    "justinfan12345".to_string()
}

fn default_capabilities() -> Vec<String> {
    vec![
        "twitch.tv/tags".to_string(),
        "twitch.tv/commands".to_string(),
        "twitch.tv/membership".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config.identity.nick, "justinfan12345");
        assert_eq!(config.identity.pass(), None);
        assert_eq!(config.channels.capabilities.len(), 3);
        assert_eq!(config.rate_limit.messages, 20);
        assert_eq!(config.transport.max_line_len, tmi_proto::DEFAULT_MAX_LINE_LEN);
    }

    #[test]
    fn sections_override_defaults() {
        let config: Config = r##"
            [identity]
            nick = "adabot"
            token = "abc123"
            privileged_colors = true

            [channels]
            join = ["Ada", "#grace"]
            capabilities = ["twitch.tv/tags"]

            [rate_limit]
            messages = 100
            window_secs = 30
        "##
        .parse()
        .unwrap();

        assert_eq!(config.identity.nick, "adabot");
        assert_eq!(config.identity.pass().as_deref(), Some("oauth:abc123"));
        assert!(config.identity.privileged_colors);
        assert_eq!(config.channels.normalized_join(), ["#ada", "#grace"]);
        assert_eq!(config.channels.capabilities, ["twitch.tv/tags"]);
        assert_eq!(config.rate_limit.messages, 100);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = "[rate_limit]\nmessages = 0\n".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = "[identity]\nnick = \"\"\n".parse::<Config>().unwrap_err();
        assert!(err.to_string().contains("identity.nick"));

        let err = "[identity\n".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
