//! Protocol line types and tokenizing.

mod nom_parser;
mod parse;
mod serialize;
/// Tag map and tag-value escaping.
pub mod tags;
mod types;

pub use self::tags::Tags;
pub use self::types::Message;
