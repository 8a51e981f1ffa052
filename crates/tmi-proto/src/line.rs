//! CRLF line framing for tokio.
//!
//! Decoding yields one line at a time with the terminator stripped; the
//! tokenizer never sees `\r` or `\n`. Encoding appends `\r\n` and refuses
//! lines that would smuggle a second command.
//!
//! An overlong line is reported once and then skipped through its newline;
//! decoding carries on with the next line.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{self, ProtocolError};

/// Default line limit: 8191 bytes of tags plus a 512-byte message body.
pub const DEFAULT_MAX_LINE_LEN: usize = 8704;

/// Codec for `\n`-terminated lines (a preceding `\r` is optional).
#[derive(Debug, Clone)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    max_len: usize,
    /// Skipping the tail of an overlong line.
    discarding: bool,
}

impl LineCodec {
    /// Create a codec with the default line limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom line limit (terminator included).
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// Maximum accepted line length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn check_control_chars(line: &str) -> error::Result<()> {
        match line.chars().find(|c| matches!(c, '\0' | '\r' | '\n')) {
            Some(ch) => Err(ProtocolError::IllegalControlChar(ch)),
            None => Ok(()),
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        let mut newline = src[self.next_index..].iter().position(|b| *b == b'\n');

        if self.discarding {
            let Some(offset) = newline else {
                src.clear();
                self.next_index = 0;
                return Ok(None);
            };
            src.advance(self.next_index + offset + 1);
            self.next_index = 0;
            self.discarding = false;
            newline = src.iter().position(|b| *b == b'\n');
        }

        let Some(offset) = newline else {
            if src.len() > self.max_len {
                let actual = src.len();
                src.clear();
                self.next_index = 0;
                self.discarding = true;
                return Err(ProtocolError::MessageTooLong {
                    actual,
                    limit: self.max_len,
                });
            }
            self.next_index = src.len();
            return Ok(None);
        };

        let line = src.split_to(self.next_index + offset + 1);
        self.next_index = 0;

        if line.len() > self.max_len {
            return Err(ProtocolError::MessageTooLong {
                actual: line.len(),
                limit: self.max_len,
            });
        }

        let body = line
            .strip_suffix(b"\n")
            .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
            .unwrap_or(&line[..]);

        let data = std::str::from_utf8(body).map_err(|e| ProtocolError::InvalidUtf8 {
            raw_line: body.to_vec(),
            byte_pos: e.valid_up_to(),
            details: e.to_string(),
            command_hint: error::extract_command_hint(body),
        })?;

        Self::check_control_chars(data)?;
        Ok(Some(data.to_owned()))
    }
}

impl<T: AsRef<str>> Encoder<T> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: T, dst: &mut BytesMut) -> error::Result<()> {
        let line = line.as_ref();
        Self::check_control_chars(line)?;

        let framed = line.len() + 2;
        if framed > self.max_len {
            return Err(ProtocolError::MessageTooLong {
                actual: framed,
                limit: self.max_len,
            });
        }

        dst.reserve(framed);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
