//! tmi-engine - connection engine for the Twitch chat dialect of IRC.
//!
//! Lines come in, typed [`Event`](event::Event)s go out to
//! [`Subscriber`](subscriber::Subscriber)s; validated chat commands go back
//! through a paced [`Transport`](outbound::Transport). The wire format lives
//! in the `tmi-proto` crate.
//!
//! ```
//! use tmi_engine::handlers::Dispatcher;
//! use tmi_engine::event::EventPayload;
//!
//! let mut dispatcher = Dispatcher::new();
//! let dispatch = dispatcher
//!     .dispatch(":tmi.twitch.tv 353 me = #ada :alice bob")
//!     .unwrap();
//! let EventPayload::NamesReply(reply) = dispatch.events[0].payload() else {
//!     unreachable!()
//! };
//! assert_eq!(reply.names, ["alice", "bob"]);
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod handlers;
pub mod outbound;
pub mod session;
pub mod state;
pub mod subscriber;
pub mod telemetry;

pub use config::Config;
pub use error::{EngineError, EngineResult};
pub use event::{Event, EventKind, EventPayload};
pub use outbound::{LineSink, Transport};
pub use session::Session;
pub use state::ConnectionState;
pub use subscriber::Subscriber;
