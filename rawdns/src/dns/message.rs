//! # DNS message model
//!
//! Header and question types for the query this crate issues, plus the
//! header view used when validating a response.
//!
//! - **HeaderSection**: message id, flags and the four section counts.
//! - **DnsHeaderFlags**: the 16-bit flags field with encode/decode helpers.
//! - **QuestionSection**: the encoded QNAME with its QTYPE and QCLASS.
//! - **DnsMessage**: header plus the single question of an `A` query.
//!
//! ```rust
//! use rawdns::dns::message::DnsMessage;
//!
//! let msg = DnsMessage::new_query("example.com", 0xADDA).unwrap();
//! let bytes = msg.encode_query();
//! assert_eq!(&bytes[..4], &[0xAD, 0xDA, 0x01, 0x00]);
//! ```
use std::fmt::Display;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::dns::errors::{DecodeError, EncodeError};
use crate::dns::name::encode_qname;
use crate::dns::wire::{HEADER_LEN, QUESTION_TRAILER_LEN, WireReader};

/// Generates a random 16-bit id for a DNS query.
pub fn generate_id() -> u16 {
    let mut thread_rng = rand::rng();
    let mut rng = SmallRng::from_rng(&mut thread_rng);

    rng.random::<u16>()
}

/// A query message: the header and exactly one question.
#[derive(Debug, Clone, PartialEq)]
pub struct DnsMessage {
    pub header: HeaderSection,
    pub question: QuestionSection,
}

impl DnsMessage {
    /// Creates a recursive `A`/`IN` query for `hostname` with the given id.
    ///
    /// # Errors
    /// Returns [`EncodeError`] if the hostname cannot be encoded as a QNAME.
    pub fn new_query(hostname: &str, id: u16) -> Result<DnsMessage, EncodeError> {
        let mut qname = Vec::with_capacity(hostname.len() + 2);
        encode_qname(hostname, &mut qname)?;

        Ok(DnsMessage {
            header: HeaderSection {
                id,
                flags: DnsHeaderFlags {
                    qr: false,
                    opcode: 0,
                    aa: false,
                    tc: false,
                    rd: true,
                    ra: false,
                    z: 0,
                    rcode: 0,
                }
                .to_u16(),
                qd_count: 1,
                an_count: 0,
                ns_count: 0,
                ar_count: 0,
            },
            question: QuestionSection {
                name: hostname.to_string(),
                qname,
                record_type: RecordType::A,
                class: RecordClass::In,
            },
        })
    }

    /// Serializes the message as `header ∥ QNAME ∥ QTYPE ∥ QCLASS`.
    pub fn encode_query(&self) -> Vec<u8> {
        let mut message =
            Vec::with_capacity(HEADER_LEN + self.question.qname.len() + QUESTION_TRAILER_LEN);

        message.extend_from_slice(&self.header.to_bytes());
        message.extend_from_slice(&self.question.qname);
        message.extend_from_slice(&self.question.record_type.to_bytes());
        message.extend_from_slice(&self.question.class.to_bytes());
        message
    }
}

/// The header section of a DNS message (RFC 1035 §4.1.1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderSection {
    /// Identifier to match requests and responses.
    pub id: u16,
    /// Flags and control bits, see [`DnsHeaderFlags`].
    pub flags: u16,
    /// Number of entries in the question section.
    pub qd_count: u16,
    /// Number of resource records in the answer section.
    pub an_count: u16,
    /// Number of name server records in the authority section.
    pub ns_count: u16,
    /// Number of resource records in the additional section.
    pub ar_count: u16,
}

#[allow(clippy::wrong_self_convention)]
impl HeaderSection {
    /// Converts the header into its 12-octet wire form.
    pub fn to_bytes(&self) -> [u8; 12] {
        let mut bytes = [0u8; 12];
        bytes[0..2].copy_from_slice(&self.id.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.flags.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.qd_count.to_be_bytes());
        bytes[6..8].copy_from_slice(&self.an_count.to_be_bytes());
        bytes[8..10].copy_from_slice(&self.ns_count.to_be_bytes());
        bytes[10..12].copy_from_slice(&self.ar_count.to_be_bytes());
        bytes
    }

    /// Reads a header from the start of `raw`.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = WireReader::new(raw);
        Ok(Self {
            id: reader.read_u16()?,
            flags: reader.read_u16()?,
            qd_count: reader.read_u16()?,
            an_count: reader.read_u16()?,
            ns_count: reader.read_u16()?,
            ar_count: reader.read_u16()?,
        })
    }
}

/// The 16-bit DNS flags field (RFC 1035 §4.1.1).
///
/// ```text
///   0  1  2  3  4  5  6  7  8  9  10 11 12 13 14 15
/// +--+-----------+--+--+--+--+--------+-----------+
/// |QR|  Opcode   |AA|TC|RD|RA|   Z    |   RCODE   |
/// +--+-----------+--+--+--+--+--------+-----------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DnsHeaderFlags {
    /// Query/Response flag
    pub qr: bool,
    /// Operation code, 0 for a standard query
    pub opcode: u8,
    /// Authoritative Answer
    pub aa: bool,
    /// Truncation flag
    pub tc: bool,
    /// Recursion Desired
    pub rd: bool,
    /// Recursion Available
    pub ra: bool,
    /// Reserved bits
    pub z: u8,
    /// Response code
    pub rcode: u8,
}

impl DnsHeaderFlags {
    /// Encode the flags into a 16-bit integer.
    pub fn to_u16(self) -> u16 {
        ((self.qr as u16) << 15)
            | ((self.opcode as u16 & 0b1111) << 11)
            | ((self.aa as u16) << 10)
            | ((self.tc as u16) << 9)
            | ((self.rd as u16) << 8)
            | ((self.ra as u16) << 7)
            | ((self.z as u16 & 0b111) << 4)
            | (self.rcode as u16 & 0b1111)
    }

    /// Decode from a 16-bit integer into structured flags.
    pub fn from_u16(value: u16) -> Self {
        Self {
            qr: (value >> 15) & 1 != 0,
            opcode: ((value >> 11) & 0b1111) as u8,
            aa: (value >> 10) & 1 != 0,
            tc: (value >> 9) & 1 != 0,
            rd: (value >> 8) & 1 != 0,
            ra: (value >> 7) & 1 != 0,
            z: ((value >> 4) & 0b111) as u8,
            rcode: (value & 0b1111) as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSection {
    /// The hostname as given by the caller.
    pub name: String,
    /// `name` in wire form: length-prefixed labels and the zero terminator.
    pub qname: Vec<u8>,
    /// QTYPE, always `A` for queries built here.
    pub record_type: RecordType,
    /// QCLASS, always `IN`.
    pub class: RecordClass,
}

/// Record types this crate looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordType {
    // A host address
    A = 1,
}

impl RecordType {
    /// Encode the record type as a 2-byte big-endian value.
    pub fn to_bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordClass {
    // The Internet
    In = 1,
}

impl RecordClass {
    pub fn to_bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

/// RCODE values from RFC 1035 §4.1.1, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl From<u8> for ResponseCode {
    fn from(value: u8) -> Self {
        match value & 0b1111 {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NxDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }
}

impl From<&u8> for ResponseCode {
    fn from(value: &u8) -> Self {
        ResponseCode::from(*value)
    }
}

impl Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseCode::NoError => write!(f, "NOERROR (0)"),
            ResponseCode::FormErr => write!(f, "FORMERR (1)"),
            ResponseCode::ServFail => write!(f, "SERVFAIL (2)"),
            ResponseCode::NxDomain => write!(f, "NXDOMAIN (3)"),
            ResponseCode::NotImp => write!(f, "NOTIMP (4)"),
            ResponseCode::Refused => write!(f, "REFUSED (5)"),
            ResponseCode::Other(code) => write!(f, "RCODE {}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_and_class_to_bytes() {
        assert_eq!(RecordType::A.to_bytes(), [0x00, 0x01]);
        assert_eq!(RecordClass::In.to_bytes(), [0x00, 0x01]);
    }

    #[test]
    fn test_dns_header_flags_encode_decode() {
        let flags = DnsHeaderFlags {
            qr: true,
            opcode: 2,
            aa: true,
            tc: false,
            rd: true,
            ra: false,
            z: 3,
            rcode: 5,
        };

        let decoded = DnsHeaderFlags::from_u16(flags.to_u16());

        assert_eq!(decoded, flags);
    }

    #[test]
    fn test_query_flags_only_set_recursion_desired() {
        let msg = DnsMessage::new_query("example.com", 1).unwrap();

        assert_eq!(msg.header.flags.to_be_bytes(), [0x01, 0x00]);
        let flags = DnsHeaderFlags::from_u16(msg.header.flags);
        assert!(flags.rd);
        assert!(!flags.qr);
        assert_eq!(flags.rcode, 0);
    }

    #[test]
    fn test_dns_message_new_query() {
        let msg = DnsMessage::new_query("example.com", 0xADDA).unwrap();

        assert_eq!(msg.header.id, 0xADDA);
        assert_eq!(msg.header.qd_count, 1);
        assert_eq!(msg.header.an_count, 0);
        assert_eq!(msg.header.ns_count, 0);
        assert_eq!(msg.header.ar_count, 0);

        assert_eq!(msg.question.name, "example.com");
        assert_eq!(msg.question.record_type, RecordType::A);
        assert_eq!(msg.question.class, RecordClass::In);
    }

    #[test]
    fn test_dns_message_encode_query() {
        let msg = DnsMessage::new_query("example.com", 0x1234).unwrap();
        let bytes = msg.encode_query();

        assert_eq!(
            &bytes[..12],
            &[0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(&bytes[bytes.len() - 4..], &[0x00, 0x01, 0x00, 0x01]);
        assert_eq!(bytes.len(), 12 + msg.question.qname.len() + 4);
    }

    #[test]
    fn test_header_bytes_round_trip() {
        let header = HeaderSection {
            id: 0xBEEF,
            flags: 0x8180,
            qd_count: 1,
            an_count: 2,
            ns_count: 0,
            ar_count: 1,
        };

        assert_eq!(HeaderSection::from_bytes(&header.to_bytes()), Ok(header));
        assert_eq!(
            HeaderSection::from_bytes(&header.to_bytes()[..11]),
            Err(DecodeError::Truncated)
        );
    }

    #[test]
    fn test_response_code_from_u8() {
        assert_eq!(ResponseCode::from(0), ResponseCode::NoError);
        assert_eq!(ResponseCode::from(3), ResponseCode::NxDomain);
        assert_eq!(ResponseCode::from(11), ResponseCode::Other(11));
        assert_eq!(ResponseCode::from(2).to_string(), "SERVFAIL (2)");
    }
}
