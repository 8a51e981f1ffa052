//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: the root [`Config`], identity and channel sections, loading
//! - [`limits`]: outbound pacing and line framing limits
//! - [`validation`]: startup checks that serde cannot express

mod limits;
mod types;
mod validation;

pub use limits::{RateLimitConfig, TransportConfig};
pub use types::{ChannelsConfig, Config, ConfigError, IdentityConfig};
pub use validation::{ValidationError, validate};
