//! # tmi-proto
//!
//! Wire-level building blocks for the Twitch flavour of IRC.
//!
//! ## Features
//!
//! - Line tokenizing into [`Message`] (tags, prefix, command, params, trailing)
//! - Tag-value escaping and the order-independent [`Tags`] map
//! - Command classification into the closed [`MessageKind`] set
//! - Slash-command grammar and validation ([`ChatCommand`])
//! - Optional Tokio line framing ([`LineCodec`])
//!
//! ## Quick Start
//!
//! ```rust
//! use tmi_proto::{Message, MessageKind};
//!
//! let raw = "@badges=broadcaster/1;display-name=Ada :ada!ada@ada.tmi.twitch.tv PRIVMSG #ada :hello";
//! let message: Message = raw.parse().expect("valid line");
//!
//! assert_eq!(message.kind(), MessageKind::PrivMsg);
//! assert_eq!(message.tag("display-name"), Some("Ada"));
//! assert_eq!(message.text(), "hello");
//! ```
//!
//! ```rust
//! use tmi_proto::chat::{ChatCommand, EncodeOptions};
//!
//! let line = ChatCommand::Timeout
//!     .encode(&["alice", "600", "spamming"], EncodeOptions::default())
//!     .expect("valid arguments");
//! assert_eq!(line, "/timeout alice 600 spamming");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod chat;
pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod prefix;
pub mod response;

pub use self::chan::{ChannelExt, ChannelForm};
pub use self::chat::{ChatCommand, EncodeOptions};
pub use self::command::MessageKind;
pub use self::error::{CommandFormatError, MessageParseError, ProtocolError, ValueError};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, DEFAULT_MAX_LINE_LEN};
pub use self::message::{Message, Tags};
pub use self::prefix::Prefix;
pub use self::response::Response;
