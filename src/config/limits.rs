//! Outbound pacing and framing limits.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::Quota;
use nonzero_ext::nonzero;
use serde::Deserialize;

/// Outbound chat pacing.
///
/// The chat service allows 20 messages per 30 seconds for ordinary
/// accounts and 100 for moderators. Lines over the limit wait; they are
/// never dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Messages allowed per window (default: 20).
    #[serde(default = "default_messages")]
    pub messages: u32,
    /// Window length in seconds (default: 30).
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            messages: default_messages(),
            window_secs: default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    /// Quota replenishing one cell every `window / messages`, with a burst
    /// of `messages`. Zero values fall back to the defaults.
    pub fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.messages).unwrap_or(nonzero!(20u32));
        let window = Duration::from_secs(self.window_secs.max(1));
        let period = window / burst.get();
        Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(nonzero!(1u32)))
            .allow_burst(burst)
    }
}

/// Line framing.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    /// Longest accepted inbound line, in bytes (default: 8704).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
        }
    }
}

fn default_messages() -> u32 {
    20
}

fn default_window_secs() -> u64 {
    30
}

fn default_max_line_len() -> usize {
    tmi_proto::DEFAULT_MAX_LINE_LEN
}
