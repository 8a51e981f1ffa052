//! NOTICE payload and its `msg-id` taxonomy.

/// Meaning of a NOTICE, from its `msg-id` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeType {
    AlreadyBanned,
    AlreadyEmoteOnlyOff,
    AlreadyEmoteOnlyOn,
    AlreadyR9kOff,
    AlreadyR9kOn,
    AlreadySubsOff,
    AlreadySubsOn,
    BadHostHosting,
    BadUnbanNoBan,
    BanSuccess,
    EmoteOnlyOff,
    EmoteOnlyOn,
    FollowersOff,
    FollowersOn,
    HostOff,
    HostOn,
    HostsRemaining,
    MsgBanned,
    MsgChannelSuspended,
    MsgRatelimit,
    R9kOff,
    R9kOn,
    SlowOff,
    SlowOn,
    SubsOff,
    SubsOn,
    TimeoutSuccess,
    UnrecognizedCmd,
    /// Missing or unmapped `msg-id`.
    None,
}

const TAXONOMY: &[(&str, NoticeType)] = &[
    ("already_banned", NoticeType::AlreadyBanned),
    ("already_emote_only_off", NoticeType::AlreadyEmoteOnlyOff),
    ("already_emote_only_on", NoticeType::AlreadyEmoteOnlyOn),
    ("already_r9k_off", NoticeType::AlreadyR9kOff),
    ("already_r9k_on", NoticeType::AlreadyR9kOn),
    ("already_subs_off", NoticeType::AlreadySubsOff),
    ("already_subs_on", NoticeType::AlreadySubsOn),
    ("bad_host_hosting", NoticeType::BadHostHosting),
    ("bad_unban_no_ban", NoticeType::BadUnbanNoBan),
    ("ban_success", NoticeType::BanSuccess),
    ("emote_only_off", NoticeType::EmoteOnlyOff),
    ("emote_only_on", NoticeType::EmoteOnlyOn),
    ("followers_off", NoticeType::FollowersOff),
    ("followers_on", NoticeType::FollowersOn),
    ("host_off", NoticeType::HostOff),
    ("host_on", NoticeType::HostOn),
    ("hosts_remaining", NoticeType::HostsRemaining),
    ("msg_banned", NoticeType::MsgBanned),
    ("msg_channel_suspended", NoticeType::MsgChannelSuspended),
    ("msg_ratelimit", NoticeType::MsgRatelimit),
    ("r9k_off", NoticeType::R9kOff),
    ("r9k_on", NoticeType::R9kOn),
    ("slow_off", NoticeType::SlowOff),
    ("slow_on", NoticeType::SlowOn),
    ("subs_off", NoticeType::SubsOff),
    ("subs_on", NoticeType::SubsOn),
    ("timeout_success", NoticeType::TimeoutSuccess),
    ("unrecognized_cmd", NoticeType::UnrecognizedCmd),
];

impl NoticeType {
    pub fn from_msg_id(msg_id: &str) -> Self {
        TAXONOMY
            .iter()
            .find(|(id, _)| *id == msg_id)
            .map_or(Self::None, |(_, kind)| *kind)
    }

    /// The `msg-id` value, or `""` for [`NoticeType::None`].
    pub fn msg_id(self) -> &'static str {
        TAXONOMY
            .iter()
            .find(|(_, kind)| *kind == self)
            .map_or("", |(id, _)| id)
    }
}

/// NOTICE from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Target channel (`*` before login completes).
    pub channel: String,
    pub kind: NoticeType,
    pub text: String,
}
