//! Error types raised by the query encoder and the response decoder.
//!
//! Every failure path maps to its own variant so callers can tell a
//! malformed hostname apart from a server-side error or a short packet.

use thiserror::Error;

use crate::dns::message::ResponseCode;

/// Errors raised while turning a hostname into a query message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The hostname is empty, starts with `.` or contains an empty label.
    #[error("Invalid hostname: {0:?}")]
    InvalidHostname(String),

    /// A single label is longer than 63 octets.
    #[error("Label too long (>63): {0}")]
    LabelTooLong(String),

    /// The encoded name is longer than 255 octets.
    #[error("Name is too long (>255): {0}")]
    NameTooLong(String),
}

/// Errors raised while validating a response and extracting the address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer ended before the field being read.
    #[error("Response is truncated")]
    Truncated,

    /// The response id does not echo the query id.
    #[error("Response id {found:#06x} does not match query id {expected:#06x}")]
    IdMismatch { expected: u16, found: u16 },

    /// The server answered with a non-zero RCODE.
    #[error("DNS server reported an error: {}", ResponseCode::from(.0))]
    ServerError(u8),

    /// The response carries no A record for the question.
    #[error("Response contains no IPv4 address")]
    NoAnswer,

    /// A name field uses one of the reserved label types.
    #[error("Malformed name field at offset {offset}")]
    MalformedName { offset: usize },

    /// An A record whose RDATA is not exactly 4 octets.
    #[error("Malformed A record: RDLENGTH is {rd_length}, expected 4")]
    MalformedRecord { rd_length: u16 },
}
