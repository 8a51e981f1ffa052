//! Decoder context: positional and tag field access with shortfall tracking.
//!
//! Every accessor that a decoder treats as required records the field name
//! when it is missing and returns a default instead, so a short line still
//! produces an event.

use std::collections::HashMap;
use std::str::FromStr;

use tmi_proto::Message;

use crate::event::Badge;

/// Per-channel buffer of names-list fragments.
///
/// Fragments for a channel accumulate until its end-of-names reply takes
/// them. Channel keys are compared ASCII-case-insensitively.
#[derive(Debug, Default)]
pub struct NameAccumulator {
    pending: HashMap<String, Vec<String>>,
}

impl NameAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment for `channel`.
    pub fn push<I>(&mut self, channel: &str, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.pending
            .entry(channel.to_ascii_lowercase())
            .or_default()
            .extend(names);
    }

    /// Remove and return everything buffered for `channel`.
    pub fn take(&mut self, channel: &str) -> Vec<String> {
        self.pending
            .remove(&channel.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Names buffered so far for `channel`.
    pub fn pending(&self, channel: &str) -> &[String] {
        self.pending
            .get(&channel.to_ascii_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every partial list (a new connection attempt starts clean).
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Handler context passed to each decoder.
pub struct Context<'a> {
    /// The tokenized line.
    pub msg: &'a Message,
    /// Names-list state for this connection.
    pub names: &'a mut NameAccumulator,
    missing: Vec<&'static str>,
}

impl<'a> Context<'a> {
    pub fn new(msg: &'a Message, names: &'a mut NameAccumulator) -> Self {
        Self {
            msg,
            names,
            missing: Vec::new(),
        }
    }

    fn note_missing(&mut self, field: &'static str) {
        if !self.missing.contains(&field) {
            self.missing.push(field);
        }
    }

    /// Fields recorded as missing, in the order they were asked for.
    pub fn into_missing(self) -> Vec<&'static str> {
        self.missing
    }

    /// Required positional parameter; `""` when absent.
    pub fn param(&mut self, index: usize, field: &'static str) -> String {
        match self.msg.param(index) {
            Some(value) if !value.is_empty() => value.to_owned(),
            _ => {
                self.note_missing(field);
                String::new()
            }
        }
    }

    pub fn opt_param(&self, index: usize) -> Option<&'a str> {
        self.msg.param(index)
    }

    /// Required trailing segment; `""` when absent. An empty trailing is
    /// present.
    pub fn trailing(&mut self, field: &'static str) -> String {
        match &self.msg.trailing {
            Some(text) => text.clone(),
            None => {
                self.note_missing(field);
                String::new()
            }
        }
    }

    pub fn opt_trailing(&self) -> Option<&'a str> {
        self.msg.trailing.as_deref()
    }

    /// Sender nickname from the prefix.
    pub fn source_nick(&mut self, field: &'static str) -> String {
        match self.msg.source_nickname() {
            Some(nick) if !nick.is_empty() => nick.to_owned(),
            _ => {
                self.note_missing(field);
                String::new()
            }
        }
    }

    /// Tag value, treating an empty value as absent.
    pub fn tag(&self, key: &str) -> Option<&'a str> {
        self.msg.tags.get_non_empty(key)
    }

    pub fn tag_owned(&self, key: &str) -> Option<String> {
        self.tag(key).map(str::to_owned)
    }

    /// Tag value or `""`.
    pub fn tag_or_default(&self, key: &str) -> String {
        self.tag(key).unwrap_or_default().to_owned()
    }

    /// Tag the decoder relies on; recorded when absent or empty.
    pub fn required_tag(&mut self, key: &'static str) -> String {
        match self.tag(key) {
            Some(value) => value.to_owned(),
            None => {
                self.note_missing(key);
                String::new()
            }
        }
    }

    /// Numeric tag. Absent reads as `None`; present but unreadable is
    /// recorded and reads as `None`.
    pub fn tag_number<T: FromStr>(&mut self, key: &'static str) -> Option<T> {
        let raw = self.tag(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.note_missing(key);
                None
            }
        }
    }

    /// Numeric tag whose presence matters on its own. `None` when absent,
    /// `Some(None)` (recorded) when present but empty or unreadable.
    pub fn present_number<T: FromStr>(&mut self, key: &'static str) -> Option<Option<T>> {
        if !self.msg.tags.contains(key) {
            return None;
        }
        if self.tag(key).is_none() {
            self.note_missing(key);
            return Some(None);
        }
        Some(self.tag_number(key))
    }

    /// Numeric tag the decoder relies on; recorded and `T::default()` when
    /// absent or unreadable.
    pub fn required_number<T: FromStr + Default>(&mut self, key: &'static str) -> T {
        if self.tag(key).is_none() {
            self.note_missing(key);
            return T::default();
        }
        self.tag_number(key).unwrap_or_default()
    }

    pub fn flag(&self, key: &str) -> bool {
        self.msg.tags.flag(key)
    }

    pub fn badges(&self, key: &str) -> Vec<Badge> {
        self.tag(key).map(Badge::parse_list).unwrap_or_default()
    }

    /// Comma-separated list tag (`emote-sets`).
    pub fn list(&self, key: &str) -> Vec<String> {
        self.tag(key)
            .map(|v| {
                v.split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_concatenates_and_clears() {
        let mut names = NameAccumulator::new();
        names.push("#Chan", ["alice".to_string(), "bob".to_string()]);
        names.push("#chan", ["carol".to_string()]);
        names.push("#other", ["dave".to_string()]);

        assert_eq!(names.pending("#chan"), ["alice", "bob", "carol"]);
        assert_eq!(names.take("#CHAN"), ["alice", "bob", "carol"]);
        assert!(names.take("#chan").is_empty());
        assert_eq!(names.pending("#other"), ["dave"]);

        names.clear();
        assert!(names.is_empty());
    }

    #[test]
    fn missing_fields_are_recorded_once() {
        let msg: Message = "JOIN".parse().unwrap();
        let mut names = NameAccumulator::new();
        let mut ctx = Context::new(&msg, &mut names);

        assert_eq!(ctx.param(0, "channel"), "");
        assert_eq!(ctx.param(0, "channel"), "");
        assert_eq!(ctx.source_nick("user"), "");
        assert_eq!(ctx.into_missing(), ["channel", "user"]);
    }

    #[test]
    fn unreadable_number_is_recorded() {
        let msg: Message = "@bits=lots;slow=10 PRIVMSG #a :x".parse().unwrap();
        let mut names = NameAccumulator::new();
        let mut ctx = Context::new(&msg, &mut names);

        assert_eq!(ctx.tag_number::<u64>("slow"), Some(10));
        assert_eq!(ctx.tag_number::<u64>("bits"), None);
        assert_eq!(ctx.tag_number::<u64>("absent"), None);
        assert_eq!(ctx.into_missing(), ["bits"]);
    }

    #[test]
    fn present_number_tells_empty_from_absent() {
        let msg: Message = "@slow=;followers-only=abc;r9k=1 ROOMSTATE #a".parse().unwrap();
        let mut names = NameAccumulator::new();
        let mut ctx = Context::new(&msg, &mut names);

        assert_eq!(ctx.present_number::<u64>("slow"), Some(None));
        assert_eq!(ctx.present_number::<i64>("followers-only"), Some(None));
        assert_eq!(ctx.present_number::<u64>("absent"), None);
        assert_eq!(ctx.into_missing(), ["slow", "followers-only"]);
    }
}
