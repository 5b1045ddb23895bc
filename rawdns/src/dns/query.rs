//! Query encoder.
//!
//! Turns a hostname into a complete recursive `A`/`IN` query:
//!
//! ```text
//! [ID:2][FLAGS:2=0x0100][QDCOUNT:2=1][ANCOUNT:2][NSCOUNT:2][ARCOUNT:2][QNAME][QTYPE:2=1][QCLASS:2=1]
//! ```

use tracing::{debug, trace};

use crate::dns::errors::EncodeError;
use crate::dns::message::{DnsMessage, generate_id};
use crate::dns::wire::{HEADER_LEN, QUESTION_TRAILER_LEN, hex_dump};

/// Builds a query for `hostname` under a fresh random transaction id.
///
/// Returns the encoded message and the id, which the caller keeps to
/// correlate the response.
///
/// ```rust
/// use rawdns::dns::query::encode_query;
///
/// let (bytes, id) = encode_query("example.com").unwrap();
/// assert_eq!(u16::from_be_bytes([bytes[0], bytes[1]]), id);
/// ```
pub fn encode_query(hostname: &str) -> Result<(Vec<u8>, u16), EncodeError> {
    let id = generate_id();
    let bytes = encode_query_with_id(hostname, id)?;
    Ok((bytes, id))
}

/// Builds a query for `hostname` under a caller-supplied id.
///
/// The same inputs always produce the same bytes.
pub fn encode_query_with_id(hostname: &str, id: u16) -> Result<Vec<u8>, EncodeError> {
    let msg = DnsMessage::new_query(hostname, id)?;
    let bytes = msg.encode_query();

    debug!(
        hostname = %msg.question.name,
        id = msg.header.id,
        size = bytes.len(),
        "encoded query"
    );
    trace!("query packet:\n{}", hex_dump(&bytes));

    Ok(bytes)
}

/// Length of the QNAME inside an encoded query, terminator included.
///
/// This is the correlation context [`decode_response`](crate::dns::response::decode_response)
/// needs to step over the echoed question.
pub fn qname_len(query: &[u8]) -> usize {
    query.len().saturating_sub(HEADER_LEN + QUESTION_TRAILER_LEN)
}
