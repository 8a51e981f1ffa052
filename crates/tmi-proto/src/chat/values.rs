//! Validated argument values for chat commands.
//!
//! Each type checks its input in the constructor; a constructed value is
//! always in range.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Longest login the service hands out.
pub const MAX_LOGIN_LEN: usize = 25;

/// Unit applied to a duration written without a suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationUnit {
    /// Bare numbers are seconds; rendered as a bare number of seconds.
    Seconds,
    /// Bare numbers are minutes; rendered with an explicit suffix.
    Minutes,
}

/// Accepted range and default unit of a duration argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DurationSpec {
    /// Unit for bare numbers.
    pub unit: DurationUnit,
    /// Inclusive lower bound, in seconds.
    pub min_secs: u64,
    /// Inclusive upper bound, in seconds.
    pub max_secs: u64,
}

/// Timeouts: 1 second up to two weeks.
pub const TIMEOUT_DURATION: DurationSpec = DurationSpec {
    unit: DurationUnit::Seconds,
    min_secs: 1,
    max_secs: 1_209_600,
};

/// Slow mode: 1 second up to two minutes.
pub const SLOW_DURATION: DurationSpec = DurationSpec {
    unit: DurationUnit::Seconds,
    min_secs: 1,
    max_secs: 120,
};

/// Followers-only mode: 0 (any follower) up to three months.
pub const FOLLOWERS_DURATION: DurationSpec = DurationSpec {
    unit: DurationUnit::Minutes,
    min_secs: 0,
    max_secs: 7_776_000,
};

/// A duration argument (`600`, `10m`, `1h`, `2d`, `1w`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChatDuration {
    seconds: u64,
    unit: DurationUnit,
}

impl ChatDuration {
    /// Parse and bound-check a duration.
    pub fn parse(raw: &str, spec: DurationSpec) -> Result<Self, ValueError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValueError::Empty);
        }

        let split = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        let (digits, suffix) = raw.split_at(split);
        let amount: u64 = digits.parse().map_err(|_| ValueError::NotANumber)?;

        let multiplier = match suffix.to_ascii_lowercase().as_str() {
            "" => match spec.unit {
                DurationUnit::Seconds => 1,
                DurationUnit::Minutes => 60,
            },
            "s" => 1,
            "m" => 60,
            "h" => 3_600,
            "d" => 86_400,
            "w" => 604_800,
            _ => return Err(ValueError::NotANumber),
        };

        let seconds = amount
            .checked_mul(multiplier)
            .filter(|s| (spec.min_secs..=spec.max_secs).contains(s))
            .ok_or(ValueError::OutOfRange {
                min: spec.min_secs,
                max: spec.max_secs,
            })?;

        Ok(ChatDuration {
            seconds,
            unit: spec.unit,
        })
    }

    /// Length in seconds.
    pub fn seconds(&self) -> u64 {
        self.seconds
    }
}

impl fmt::Display for ChatDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            DurationUnit::Seconds => write!(f, "{}", self.seconds),
            DurationUnit::Minutes if self.seconds % 60 == 0 => write!(f, "{}m", self.seconds / 60),
            DurationUnit::Minutes => write!(f, "{}s", self.seconds),
        }
    }
}

/// The fixed colour palette open to every account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedColor {
    /// Blue
    Blue,
    /// BlueViolet
    BlueViolet,
    /// CadetBlue
    CadetBlue,
    /// Chocolate
    Chocolate,
    /// Coral
    Coral,
    /// DodgerBlue
    DodgerBlue,
    /// Firebrick
    Firebrick,
    /// GoldenRod
    GoldenRod,
    /// Green
    Green,
    /// HotPink
    HotPink,
    /// OrangeRed
    OrangeRed,
    /// Red
    Red,
    /// SeaGreen
    SeaGreen,
    /// SpringGreen
    SpringGreen,
    /// YellowGreen
    YellowGreen,
}

impl NamedColor {
    /// Every palette entry.
    pub const ALL: [NamedColor; 15] = [
        NamedColor::Blue,
        NamedColor::BlueViolet,
        NamedColor::CadetBlue,
        NamedColor::Chocolate,
        NamedColor::Coral,
        NamedColor::DodgerBlue,
        NamedColor::Firebrick,
        NamedColor::GoldenRod,
        NamedColor::Green,
        NamedColor::HotPink,
        NamedColor::OrangeRed,
        NamedColor::Red,
        NamedColor::SeaGreen,
        NamedColor::SpringGreen,
        NamedColor::YellowGreen,
    ];

    /// Canonical palette name.
    pub fn as_str(&self) -> &'static str {
        match self {
            NamedColor::Blue => "Blue",
            NamedColor::BlueViolet => "BlueViolet",
            NamedColor::CadetBlue => "CadetBlue",
            NamedColor::Chocolate => "Chocolate",
            NamedColor::Coral => "Coral",
            NamedColor::DodgerBlue => "DodgerBlue",
            NamedColor::Firebrick => "Firebrick",
            NamedColor::GoldenRod => "GoldenRod",
            NamedColor::Green => "Green",
            NamedColor::HotPink => "HotPink",
            NamedColor::OrangeRed => "OrangeRed",
            NamedColor::Red => "Red",
            NamedColor::SeaGreen => "SeaGreen",
            NamedColor::SpringGreen => "SpringGreen",
            NamedColor::YellowGreen => "YellowGreen",
        }
    }
}

impl FromStr for NamedColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedColor::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or(ValueError::UnknownColor)
    }
}

/// A name colour: a palette entry, or `#RRGGBB` for privileged accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatColor {
    /// Palette entry.
    Named(NamedColor),
    /// Arbitrary RGB colour.
    Hex([u8; 3]),
}

impl ChatColor {
    /// Parse a colour; hex colours are only accepted when `privileged`.
    pub fn parse(raw: &str, privileged: bool) -> Result<Self, ValueError> {
        if raw.is_empty() {
            return Err(ValueError::Empty);
        }
        if let Ok(named) = raw.parse::<NamedColor>() {
            return Ok(ChatColor::Named(named));
        }
        if !privileged {
            return Err(ValueError::UnknownColor);
        }

        let hex = raw.strip_prefix('#').ok_or(ValueError::UnknownColor)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValueError::UnknownColor);
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(ChatColor::Hex([r, g, b])),
            _ => Err(ValueError::UnknownColor),
        }
    }
}

impl fmt::Display for ChatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatColor::Named(named) => f.write_str(named.as_str()),
            ChatColor::Hex([r, g, b]) => write!(f, "#{:02X}{:02X}{:02X}", r, g, b),
        }
    }
}

/// Length of a commercial break, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommercialLength(u16);

impl CommercialLength {
    /// Allowed lengths.
    pub const CHOICES: [u16; 6] = [30, 60, 90, 120, 150, 180];

    /// Validate a commercial length.
    pub fn new(seconds: u16) -> Result<Self, ValueError> {
        if Self::CHOICES.contains(&seconds) {
            Ok(CommercialLength(seconds))
        } else {
            Err(ValueError::NotAChoice("30, 60, 90, 120, 150, 180"))
        }
    }

    /// Length in seconds.
    pub fn seconds(&self) -> u16 {
        self.0
    }
}

impl FromStr for CommercialLength {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seconds: u16 = s.trim().parse().map_err(|_| ValueError::NotANumber)?;
        CommercialLength::new(seconds)
    }
}

impl fmt::Display for CommercialLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user or channel login. One leading `@` or `#` is accepted and dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    /// Validate a login.
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let bare = raw
            .strip_prefix('@')
            .or_else(|| raw.strip_prefix('#'))
            .unwrap_or(raw);
        if bare.is_empty() {
            return Err(ValueError::Empty);
        }
        if let Some(bad) = bare.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(ValueError::IllegalChar(bad));
        }
        if bare.len() > MAX_LOGIN_LEN {
            return Err(ValueError::TooLong(MAX_LOGIN_LEN));
        }
        Ok(Login(bare.to_owned()))
    }

    /// The bare login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check a message id (UUID-like: hex digits and dashes).
pub(crate) fn validate_message_id(raw: &str) -> Result<(), ValueError> {
    if raw.is_empty() {
        return Err(ValueError::Empty);
    }
    if let Some(bad) = raw.chars().find(|c| !(c.is_ascii_hexdigit() || *c == '-')) {
        return Err(ValueError::IllegalChar(bad));
    }
    if raw.len() > 64 {
        return Err(ValueError::TooLong(64));
    }
    Ok(())
}

/// Check free text: non-empty and free of line breaks.
pub(crate) fn validate_free_text(raw: &str) -> Result<(), ValueError> {
    if raw.trim().is_empty() {
        return Err(ValueError::Empty);
    }
    match raw.chars().find(|c| matches!(c, '\r' | '\n' | '\0')) {
        Some(bad) => Err(ValueError::IllegalChar(bad)),
        None => Ok(()),
    }
}
