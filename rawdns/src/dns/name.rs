//! Domain names on the wire.
//!
//! A name is a sequence of labels, each prefixed by a length octet, ended by
//! a zero-length label (RFC 1035 §3.1). Responses may also shorten a name with
//! a compression pointer (RFC 1035 §4.1.4):
//!
//! ```text
//!   +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//!   | 1  1|                OFFSET                   |
//!   +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```
//!
//! Queries built here never use pointers; the decoder only needs to step over
//! whichever form the server chose.

use crate::dns::errors::{DecodeError, EncodeError};
use crate::dns::wire::{MAX_LABEL_LEN, MAX_NAME_LEN, POINTER_MASK, WireReader};

/// Writes `hostname` as a QNAME into `message` and returns the number of
/// octets written, terminator included.
///
/// A single trailing `.` is accepted as the fully-qualified form. Nothing is
/// written when an error is returned.
///
/// # Errors
/// - [`EncodeError::InvalidHostname`] for an empty hostname, a leading `.`
///   or an empty label between two dots.
/// - [`EncodeError::LabelTooLong`] for a label over 63 octets.
/// - [`EncodeError::NameTooLong`] when the encoded name exceeds 255 octets.
pub fn encode_qname(hostname: &str, message: &mut Vec<u8>) -> Result<usize, EncodeError> {
    if hostname.is_empty() || hostname.starts_with('.') {
        return Err(EncodeError::InvalidHostname(hostname.to_string()));
    }
    let name = hostname.strip_suffix('.').unwrap_or(hostname);

    for label in name.split('.') {
        if label.is_empty() {
            return Err(EncodeError::InvalidHostname(hostname.to_string()));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(EncodeError::LabelTooLong(label.to_string()));
        }
    }

    // One length octet per label replaces each dot, plus the leading length
    // octet and the terminator.
    let encoded_len = name.len() + 2;
    if encoded_len > MAX_NAME_LEN {
        return Err(EncodeError::NameTooLong(hostname.to_string()));
    }

    message.reserve(encoded_len);
    for label in name.split('.') {
        message.push(label.len() as u8);
        message.extend_from_slice(label.as_bytes());
    }
    message.push(0);

    Ok(encoded_len)
}

/// How a NAME field was encoded in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    /// The whole name is a single compression pointer.
    Pointer(u16),
    /// Labels ended by the zero terminator.
    Labels { octets: usize },
    /// One or more labels ended by a compression pointer.
    LabelsThenPointer { octets: usize, pointer: u16 },
}

impl NameField {
    /// Number of octets the field occupies in the message.
    pub fn wire_len(&self) -> usize {
        match self {
            NameField::Pointer(_) => 2,
            NameField::Labels { octets } | NameField::LabelsThenPointer { octets, .. } => *octets,
        }
    }
}

/// Advances `reader` past a NAME field without following pointers.
///
/// # Errors
/// - [`DecodeError::Truncated`] if the message ends inside the name.
/// - [`DecodeError::MalformedName`] for the reserved `01`/`10` label types or
///   a label run longer than 255 octets.
pub fn skip_name(reader: &mut WireReader<'_>) -> Result<NameField, DecodeError> {
    let start = reader.position();
    loop {
        let offset = reader.position();
        let len = reader.read_u8()?;

        match len & POINTER_MASK {
            POINTER_MASK => {
                let low = reader.read_u8()?;
                let pointer = u16::from_be_bytes([len & !POINTER_MASK, low]);
                return Ok(if offset == start {
                    NameField::Pointer(pointer)
                } else {
                    NameField::LabelsThenPointer {
                        octets: reader.position() - start,
                        pointer,
                    }
                });
            }
            0 if len == 0 => {
                return Ok(NameField::Labels {
                    octets: reader.position() - start,
                });
            }
            0 => {
                reader.skip(len as usize)?;
                if reader.position() - start >= MAX_NAME_LEN {
                    return Err(DecodeError::MalformedName { offset: start });
                }
            }
            _ => return Err(DecodeError::MalformedName { offset }),
        }
    }
}
