//! ROOMSTATE deltas and the snapshot consumers merge them into.
//!
//! A ROOMSTATE line only carries the settings that changed. The decoder
//! never resets a setting that is absent from the line; callers that need
//! the full picture keep a [`RoomSnapshot`] and [`apply`](RoomSnapshot::apply)
//! each delta to it.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of room settings, one bit each.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoomStateFlags(u8);

impl RoomStateFlags {
    pub const EMOTE_ONLY: Self = Self(1 << 0);
    pub const MERCURY: Self = Self(1 << 1);
    pub const R9K: Self = Self(1 << 2);
    pub const RITUALS: Self = Self(1 << 3);
    pub const SUBS_ONLY: Self = Self(1 << 4);
    pub const FOLLOWERS_ONLY: Self = Self(1 << 5);
    pub const SLOW: Self = Self(1 << 6);
    pub const BROADCASTER_LANG: Self = Self(1 << 7);

    /// Every flag with the tag that carries it.
    pub const TAGS: [(Self, &'static str); 8] = [
        (Self::EMOTE_ONLY, "emote-only"),
        (Self::MERCURY, "mercury"),
        (Self::R9K, "r9k"),
        (Self::RITUALS, "rituals"),
        (Self::SUBS_ONLY, "subs-only"),
        (Self::FOLLOWERS_ONLY, "followers-only"),
        (Self::SLOW, "slow"),
        (Self::BROADCASTER_LANG, "broadcaster-lang"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Tag names of the set flags, in bit order.
    pub fn tag_names(self) -> impl Iterator<Item = &'static str> {
        Self::TAGS
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, tag)| tag)
    }
}

impl BitOr for RoomStateFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RoomStateFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for RoomStateFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.tag_names()).finish()
    }
}

/// One ROOMSTATE delta.
///
/// `changed` has a bit for every setting tag present on the line; the
/// matching field holds its new value. Fields for absent tags are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomState {
    pub channel: String,
    pub room_id: Option<String>,
    pub changed: RoomStateFlags,
    pub emote_only: Option<bool>,
    pub mercury: Option<bool>,
    pub r9k: Option<bool>,
    pub rituals: Option<bool>,
    pub subs_only: Option<bool>,
    /// Minutes of follow age required; `-1` disables the mode.
    pub followers_only: Option<i64>,
    /// Seconds between messages; `0` disables the mode.
    pub slow: Option<u64>,
    /// Empty when no language is set.
    pub broadcaster_lang: Option<String>,
}

impl RoomState {
    pub fn is_delta_of(&self, flag: RoomStateFlags) -> bool {
        self.changed.contains(flag)
    }
}

/// Accumulated room settings for one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub channel: String,
    pub room_id: Option<String>,
    /// Settings observed at least once.
    pub known: RoomStateFlags,
    pub emote_only: bool,
    pub mercury: bool,
    pub r9k: bool,
    pub rituals: bool,
    pub subs_only: bool,
    pub followers_only: i64,
    pub slow: u64,
    pub broadcaster_lang: String,
}

impl RoomSnapshot {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            followers_only: -1,
            ..Default::default()
        }
    }

    /// Merge a delta; settings it does not carry keep their values.
    pub fn apply(&mut self, delta: &RoomState) {
        if delta.room_id.is_some() {
            self.room_id.clone_from(&delta.room_id);
        }
        if let Some(v) = delta.emote_only {
            self.emote_only = v;
        }
        if let Some(v) = delta.mercury {
            self.mercury = v;
        }
        if let Some(v) = delta.r9k {
            self.r9k = v;
        }
        if let Some(v) = delta.rituals {
            self.rituals = v;
        }
        if let Some(v) = delta.subs_only {
            self.subs_only = v;
        }
        if let Some(v) = delta.followers_only {
            self.followers_only = v;
        }
        if let Some(v) = delta.slow {
            self.slow = v;
        }
        if let Some(v) = &delta.broadcaster_lang {
            self.broadcaster_lang.clone_from(v);
        }
        self.known |= delta.changed;
    }

    /// Settings currently switched on.
    pub fn enabled(&self) -> RoomStateFlags {
        let mut flags = RoomStateFlags::empty();
        for (on, flag) in [
            (self.emote_only, RoomStateFlags::EMOTE_ONLY),
            (self.mercury, RoomStateFlags::MERCURY),
            (self.r9k, RoomStateFlags::R9K),
            (self.rituals, RoomStateFlags::RITUALS),
            (self.subs_only, RoomStateFlags::SUBS_ONLY),
            (self.followers_only >= 0, RoomStateFlags::FOLLOWERS_ONLY),
            (self.slow > 0, RoomStateFlags::SLOW),
            (!self.broadcaster_lang.is_empty(), RoomStateFlags::BROADCASTER_LANG),
        ] {
            if on {
                flags.insert(flag);
            }
        }
        flags
    }
}
