//! Channel name utilities.
//!
//! Besides the plain `#login` form, the service addresses chat rooms as
//! `#chatrooms:<channel-id>:<room-id>`.

/// Shape of a channel name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelForm<'a> {
    /// A broadcaster's channel (`#login`).
    Channel(&'a str),
    /// A chat room (`#chatrooms:<channel-id>:<room-id>`).
    ChatRoom {
        /// Numeric id of the owning channel.
        channel_id: &'a str,
        /// Room identifier.
        room_id: &'a str,
    },
    /// Anything else (a nickname, an empty string, ...).
    Other,
}

/// Extension trait for checking channel names.
pub trait ChannelExt {
    /// Check if this string is a valid channel name.
    ///
    /// Valid channel names:
    /// - Start with '#', '&', '+', or '!'
    /// - Do not contain space, comma, BEL (0x07), or NUL
    /// - Are at most 200 bytes long (chat room names are long)
    fn is_channel_name(&self) -> bool;

    /// Classify the channel name into its [`ChannelForm`].
    fn channel_form(&self) -> ChannelForm<'_>;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        let mut chars = self.chars();

        match chars.next() {
            Some('#' | '&' | '+' | '!') => {}
            _ => return false,
        }

        if self.len() > 200 {
            return false;
        }

        chars.all(|c| !(c == ' ' || c == ',' || c.is_control()))
    }

    fn channel_form(&self) -> ChannelForm<'_> {
        let Some(name) = self.strip_prefix('#') else {
            return ChannelForm::Other;
        };
        if name.is_empty() || !self.is_channel_name() {
            return ChannelForm::Other;
        }

        if let Some(room) = name.strip_prefix("chatrooms:") {
            return match room.split_once(':') {
                Some((channel_id, room_id)) if !channel_id.is_empty() && !room_id.is_empty() => {
                    ChannelForm::ChatRoom {
                        channel_id,
                        room_id,
                    }
                }
                _ => ChannelForm::Other,
            };
        }

        ChannelForm::Channel(name)
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }

    fn channel_form(&self) -> ChannelForm<'_> {
        self.as_str().channel_form()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_channel_names() {
        assert!("#ada".is_channel_name());
        assert!("&local".is_channel_name());
        assert!("#chatrooms:44322889:04e762ec-ce8f-4cbc-b6a3-ffc871ab53da".is_channel_name());
    }

    #[test]
    fn test_invalid_channel_names() {
        assert!(!"ada".is_channel_name());
        assert!(!"".is_channel_name());
        assert!(!"#with space".is_channel_name());
        assert!(!"#with,comma".is_channel_name());
    }

    #[test]
    fn test_channel_form() {
        assert_eq!("#ada".channel_form(), ChannelForm::Channel("ada"));
        assert_eq!(
            "#chatrooms:44322889:04e762ec".channel_form(),
            ChannelForm::ChatRoom {
                channel_id: "44322889",
                room_id: "04e762ec",
            }
        );
        assert_eq!("#chatrooms:44322889".channel_form(), ChannelForm::Other);
        assert_eq!("ada".channel_form(), ChannelForm::Other);
        assert_eq!("#".channel_form(), ChannelForm::Other);
    }
}
