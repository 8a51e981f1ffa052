//! Numeric server replies understood by the classifier.
//!
//! Only the numerics the chat service actually sends are listed; any other
//! 3-digit code classifies as [`MessageKind::Unknown`](crate::MessageKind).

#![allow(non_camel_case_types)]

use std::fmt;
use std::str::FromStr;

/// Server reply code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 001 - Welcome
    RPL_WELCOME = 1,
    /// 002 - Your host
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server info
    RPL_MYINFO = 4,
    /// 353 - Names list fragment
    RPL_NAMREPLY = 353,
    /// 366 - End of names list
    RPL_ENDOFNAMES = 366,
    /// 372 - MOTD line
    RPL_MOTD = 372,
    /// 375 - Start of MOTD
    RPL_MOTDSTART = 375,
    /// 376 - End of MOTD
    RPL_ENDOFMOTD = 376,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
}

impl Response {
    /// Returns the numeric code as u16
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Creates a Response from a numeric code
    pub fn from_code(code: u16) -> Option<Response> {
        let response = match code {
            1 => Response::RPL_WELCOME,
            2 => Response::RPL_YOURHOST,
            3 => Response::RPL_CREATED,
            4 => Response::RPL_MYINFO,
            353 => Response::RPL_NAMREPLY,
            366 => Response::RPL_ENDOFNAMES,
            372 => Response::RPL_MOTD,
            375 => Response::RPL_MOTDSTART,
            376 => Response::RPL_ENDOFMOTD,
            421 => Response::ERR_UNKNOWNCOMMAND,
            _ => return None,
        };
        Some(response)
    }

    /// Symbolic name (`RPL_NAMREPLY`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Response::RPL_WELCOME => "RPL_WELCOME",
            Response::RPL_YOURHOST => "RPL_YOURHOST",
            Response::RPL_CREATED => "RPL_CREATED",
            Response::RPL_MYINFO => "RPL_MYINFO",
            Response::RPL_NAMREPLY => "RPL_NAMREPLY",
            Response::RPL_ENDOFNAMES => "RPL_ENDOFNAMES",
            Response::RPL_MOTD => "RPL_MOTD",
            Response::RPL_MOTDSTART => "RPL_MOTDSTART",
            Response::RPL_ENDOFMOTD => "RPL_ENDOFMOTD",
            Response::ERR_UNKNOWNCOMMAND => "ERR_UNKNOWNCOMMAND",
        }
    }

    /// Check if this is an error response (4xx, 5xx)
    #[inline]
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.code())
    }

    /// Check if this belongs to the registration burst (001-099)
    #[inline]
    pub fn is_registration(&self) -> bool {
        self.code() < 100
    }
}

/// Formats as the zero-padded 3-digit code.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

/// Error returned when a token is not a known 3-digit reply code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("not a known reply code: {0:?}")]
pub struct ParseResponseError(pub String);

impl FromStr for Response {
    type Err = ParseResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseResponseError(s.to_owned()));
        }
        s.parse::<u16>()
            .ok()
            .and_then(Response::from_code)
            .ok_or_else(|| ParseResponseError(s.to_owned()))
    }
}
