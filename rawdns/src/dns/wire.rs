//! Shared binary-field helpers used by both the encoder and the decoder.
//!
//! All multi-octet fields on the wire are big-endian (RFC 1035 §2.3.2).

use std::fmt::Write;

use crate::dns::errors::DecodeError;

/// Size of the fixed DNS header.
pub const HEADER_LEN: usize = 12;
/// QTYPE + QCLASS following the QNAME of a question.
pub const QUESTION_TRAILER_LEN: usize = 4;
/// Maximum length of a single label.
pub const MAX_LABEL_LEN: usize = 63;
/// Maximum length of an encoded domain name, terminator included.
pub const MAX_NAME_LEN: usize = 255;
/// High two bits of a length octet marking a compression pointer.
pub const POINTER_MASK: u8 = 0b1100_0000;

/// Read-only cursor over a received message.
///
/// Reads past the end of the buffer return [`DecodeError::Truncated`]
/// instead of panicking.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the message.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.buf.get(self.pos).ok_or(DecodeError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Returns the next `len` octets and advances past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::Truncated);
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_bytes(len).map(|_| ())
    }
}

/// Renders a packet as two-octet hex groups, one group per line.
///
/// ```text
/// ad da
/// 01 00
/// 00 01
/// ```
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, pair) in bytes.chunks(2).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (j, byte) in pair.iter().enumerate() {
            if j > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:02x}", byte);
        }
    }
    out
}
