//! Per-user state and moderation payloads.

use super::privmsg::Badge;

/// USERSTATE: the logged-in user's state in one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub channel: String,
    pub display_name: String,
    pub color: Option<String>,
    pub badges: Vec<Badge>,
    pub badge_info: Vec<Badge>,
    pub emote_sets: Vec<String>,
    pub is_moderator: bool,
    pub is_subscriber: bool,
}

/// GLOBALUSERSTATE: the logged-in user's state after login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalUserState {
    pub user_id: Option<String>,
    pub display_name: String,
    pub color: Option<String>,
    pub badges: Vec<Badge>,
    pub emote_sets: Vec<String>,
}

/// CLEARCHAT: the whole chat, or one user's messages, were removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearChat {
    pub channel: String,
    /// `None` when the whole chat was cleared.
    pub target: Option<String>,
    pub target_user_id: Option<String>,
    /// Timeout length in seconds; `None` with a target means a ban.
    pub ban_duration: Option<u64>,
}

impl ClearChat {
    pub fn is_permanent_ban(&self) -> bool {
        self.target.is_some() && self.ban_duration.is_none()
    }
}

/// CLEARMSG: one message was deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearMessage {
    pub channel: String,
    pub login: String,
    pub target_message_id: String,
    pub body: String,
}

/// HOSTTARGET: host mode started or ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostTarget {
    /// The hosting channel.
    pub channel: String,
    /// `None` when hosting stopped.
    pub target: Option<String>,
    pub viewers: Option<u64>,
}
