//! Message tag map and tag-value escaping.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt::{self, Display, Formatter, Result as FmtResult, Write};

/// Escape a tag value for serialization.
///
/// Escapes special characters according to the IRCv3 message-tags rules.
pub fn escape_tag_value(f: &mut dyn Write, value: &str) -> FmtResult {
    for c in value.chars() {
        match c {
            ';' => f.write_str("\\:")?,
            ' ' => f.write_str("\\s")?,
            '\\' => f.write_str("\\\\")?,
            '\r' => f.write_str("\\r")?,
            '\n' => f.write_str("\\n")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Unescape a tag value from wire format.
///
/// Reverses [`escape_tag_value`]. Unknown escapes lose their backslash and a
/// dangling trailing backslash is dropped.
pub fn unescape_tag_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut iter = value.chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => break,
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    unescaped
}

/// Metadata tags attached to a line.
///
/// An absent tag segment is an empty map. A boolean tag (no `=`) is stored
/// with an empty value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    /// Create an empty tag map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw tag segment (without the leading `@`).
    ///
    /// Entries are split on `;`, then on the first `=`. Empty entries are
    /// skipped; a later duplicate key replaces an earlier one.
    pub fn parse(raw: &str) -> Self {
        let map = raw
            .split(';')
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once('=') {
                Some((key, value)) => (key.to_owned(), unescape_tag_value(value)),
                None => (entry.to_owned(), String::new()),
            })
            .collect();
        Tags(map)
    }

    /// Value of a tag, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of a tag, treating an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Whether a tag is present (with or without a value).
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Interpret a tag as a `0`/`1` flag. Absent or unreadable reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some("1") | Some("true"))
    }

    /// Insert or replace a tag.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tags are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate tags in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Tags(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Writes the tag segment without the leading `@`. Empty values are written
/// as boolean tags.
impl Display for Tags {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(';')?;
            }
            f.write_str(key)?;
            if !value.is_empty() {
                f.write_char('=')?;
                escape_tag_value(f, value)?;
            }
        }
        Ok(())
    }
}
