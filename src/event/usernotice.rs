//! USERNOTICE payloads (subscriptions, raids, rituals).

use super::privmsg::Badge;

/// Subscription tier from `msg-param-sub-plan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubPlan {
    Prime,
    Tier1,
    Tier2,
    Tier3,
}

impl SubPlan {
    pub fn from_tag(value: &str) -> Option<Self> {
        match value {
            "Prime" => Some(Self::Prime),
            "1000" => Some(Self::Tier1),
            "2000" => Some(Self::Tier2),
            "3000" => Some(Self::Tier3),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prime => "Prime",
            Self::Tier1 => "1000",
            Self::Tier2 => "2000",
            Self::Tier3 => "3000",
        }
    }
}

/// Sub-kind of a USERNOTICE, selected by its `msg-id` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNoticeKind {
    Sub {
        plan: Option<SubPlan>,
    },
    Resub {
        cumulative_months: u32,
        streak_months: u32,
        plan: Option<SubPlan>,
    },
    GiftSub {
        recipient_login: String,
        recipient_display_name: String,
        plan: Option<SubPlan>,
    },
    Raid {
        raider: String,
        viewer_count: u32,
    },
    Ritual {
        ritual: String,
    },
    /// Any `msg-id` without a dedicated sub-kind.
    None,
}

/// USERNOTICE on a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub channel: String,
    pub kind: UserNoticeKind,
    /// Raw `msg-id` tag value.
    pub msg_id: String,
    /// Login of the user the notice is about.
    pub login: String,
    pub display_name: String,
    pub color: Option<String>,
    pub badges: Vec<Badge>,
    /// Server-written description (`system-msg`).
    pub system_message: String,
    /// The user's own message, when they attached one.
    pub body: Option<String>,
}
