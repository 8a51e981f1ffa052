//! Membership, mode and names-list payloads.

/// A user entering or leaving a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    pub user: String,
    pub channel: String,
}

/// `+` or `-` in a mode string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeModifier {
    Add,
    Remove,
}

impl ModeModifier {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Remove),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Remove => '-',
        }
    }
}

/// A single mode change (`+o alice`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeChange {
    /// First character of the mode string, when it is `+` or `-`.
    pub modifier: Option<ModeModifier>,
    /// Second character of the mode string.
    pub mode: Option<char>,
    /// Mode arguments (the affected user for `o`).
    pub arguments: String,
}

impl ModeChange {
    /// Split a mode string such as `+o` into modifier and mode letter.
    pub fn parse(modes: &str, arguments: impl Into<String>) -> Self {
        let mut chars = modes.chars();
        Self {
            modifier: chars.next().and_then(ModeModifier::from_char),
            mode: chars.next(),
            arguments: arguments.into(),
        }
    }

    pub fn is_adding(&self) -> bool {
        self.modifier == Some(ModeModifier::Add)
    }
}

/// MODE on a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelMode {
    pub channel: String,
    pub change: ModeChange,
}

/// MODE on anything that is not a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserMode {
    pub target: String,
    pub change: ModeChange,
}

/// Operator status granted or revoked, derived from a `o` channel mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOperator {
    pub channel: String,
    pub user: String,
    pub is_operator: bool,
}

impl ChannelOperator {
    /// Derive from a channel mode; `None` unless the mode letter is `o`.
    pub fn from_mode(mode: &ChannelMode) -> Option<Self> {
        if mode.change.mode != Some('o') {
            return None;
        }
        Some(Self {
            channel: mode.channel.clone(),
            user: mode.change.arguments.clone(),
            is_operator: mode.change.is_adding(),
        })
    }
}

/// Channel visibility reported in a names reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamesStatus {
    /// `=`
    Public,
    /// `@`
    Secret,
    /// `*`
    Private,
    #[default]
    Unrecognized,
}

impl NamesStatus {
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "=" => Self::Public,
            "@" => Self::Secret,
            "*" => Self::Private,
            _ => Self::Unrecognized,
        }
    }
}

/// One fragment of a channel's names list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamesReply {
    pub channel: String,
    pub status: NamesStatus,
    /// Names in this fragment, in order.
    pub names: Vec<String>,
}

impl NamesReply {
    pub fn is_public(&self) -> bool {
        self.status == NamesStatus::Public
    }

    pub fn is_secret(&self) -> bool {
        self.status == NamesStatus::Secret
    }

    pub fn is_private(&self) -> bool {
        self.status == NamesStatus::Private
    }
}

/// End of a names list, carrying every fragment received for the channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndOfNames {
    pub channel: String,
    /// All fragments concatenated in arrival order, duplicates kept.
    pub names: Vec<String>,
}
