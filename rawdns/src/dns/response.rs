//! Response decoder.
//!
//! Validates a server response against the query it answers and pulls out
//! the first IPv4 address. Checks run in a fixed order:
//!
//! 1. at least a full header, else [`DecodeError::Truncated`]
//! 2. RCODE, reported as [`DecodeError::ServerError`] even when the id is also wrong
//! 3. id correlation, [`DecodeError::IdMismatch`]
//! 4. the answer section, walked record by record
//!
//! Answer NAME fields are stepped over according to their encoding, so both
//! compressed and uncompressed owner names are handled.

use std::net::Ipv4Addr;

use tracing::{debug, trace, warn};

use crate::dns::errors::DecodeError;
use crate::dns::message::{DnsHeaderFlags, HeaderSection, RecordClass, RecordType};
use crate::dns::name::{NameField, skip_name};
use crate::dns::wire::{HEADER_LEN, QUESTION_TRAILER_LEN, WireReader, hex_dump};

/// Fixed part of a resource record that follows its NAME (RFC 1035 §4.1.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceHeader {
    pub name: NameField,
    pub record_type: u16,
    pub class: u16,
    pub ttl: u32,
    pub rd_length: u16,
}

impl ResourceHeader {
    /// Reads NAME, TYPE, CLASS, TTL and RDLENGTH, leaving `reader` on RDATA.
    pub fn read(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: skip_name(reader)?,
            record_type: reader.read_u16()?,
            class: reader.read_u16()?,
            ttl: reader.read_u32()?,
            rd_length: reader.read_u16()?,
        })
    }

    fn is_ipv4(&self) -> bool {
        self.record_type == RecordType::A as u16 && self.class == RecordClass::In as u16
    }
}

/// Decodes `raw` as the answer to the query sent under `expected_id`.
///
/// `qname_len` is the length of the QNAME sent in the query, terminator
/// included (see [`qname_len`](crate::dns::query::qname_len)); the server
/// echoes the question and it is skipped by that length.
///
/// Answer records that are not `A`/`IN`, such as a CNAME chain in front of
/// the address, are skipped.
///
/// ```rust
/// use rawdns::dns::errors::DecodeError;
/// use rawdns::dns::response::decode_response;
///
/// assert_eq!(decode_response(&[0u8; 5], 1, 13), Err(DecodeError::Truncated));
/// ```
pub fn decode_response(
    raw: &[u8],
    expected_id: u16,
    qname_len: usize,
) -> Result<Ipv4Addr, DecodeError> {
    trace!("response packet:\n{}", hex_dump(raw));

    if raw.len() < HEADER_LEN {
        return Err(DecodeError::Truncated);
    }
    let header = HeaderSection::from_bytes(raw)?;
    let flags = DnsHeaderFlags::from_u16(header.flags);

    if flags.rcode != 0 {
        return Err(DecodeError::ServerError(flags.rcode));
    }
    if header.id != expected_id {
        warn!(expected = expected_id, found = header.id, "response id mismatch");
        return Err(DecodeError::IdMismatch {
            expected: expected_id,
            found: header.id,
        });
    }
    if flags.tc {
        warn!(id = header.id, "response has the truncation flag set");
    }
    if header.an_count == 0 {
        return Err(DecodeError::NoAnswer);
    }

    let mut reader = WireReader::new(raw);
    // `qname_len` is caller-supplied, so no summed offset.
    reader.skip(HEADER_LEN)?;
    reader.skip(qname_len)?;
    reader.skip(QUESTION_TRAILER_LEN)?;

    for _ in 0..header.an_count {
        let record = ResourceHeader::read(&mut reader)?;

        if !record.is_ipv4() {
            debug!(
                record_type = record.record_type,
                name_len = record.name.wire_len(),
                rd_length = record.rd_length,
                "skipping answer record"
            );
            reader.skip(record.rd_length as usize)?;
            continue;
        }

        if record.rd_length != 4 {
            return Err(DecodeError::MalformedRecord {
                rd_length: record.rd_length,
            });
        }
        let rdata = reader.read_bytes(4)?;
        let address = Ipv4Addr::new(rdata[0], rdata[1], rdata[2], rdata[3]);

        debug!(id = header.id, %address, ttl = record.ttl, "decoded answer");
        return Ok(address);
    }

    Err(DecodeError::NoAnswer)
}
