//! # rawdns DNS Library
//!
//! Builds a DNS query for a hostname, and turns the server's answer back into
//! an IPv4 address, without going through the system resolver.
//!
//! ## Modules
//!
//! - `query` - encodes a hostname into a recursive `A`/`IN` query.
//! - `response` - validates a response and extracts the first IPv4 address.
//! - `message` - header, flags and question types shared by both.
//! - `name` - QNAME encoding and NAME field skipping.
//! - `wire` - big-endian field reader and packet hex dump.
//! - `resolver` - UDP transport and the `resolve_ipv4*` entry points
//!   (`std` / `tokio-dep` features).
//!
//! The codec modules do no I/O and are always available.
//!
//! ## Quick Example
//!
//! ```rust
//! use rawdns::dns::query::{encode_query_with_id, qname_len};
//! use rawdns::dns::response::decode_response;
//!
//! let query = encode_query_with_id("example.com", 0xADDA).unwrap();
//!
//! // A server reply: the query echoed back with QR/RA set, one answer
//! // whose NAME points at the question.
//! let mut reply = query.clone();
//! reply[2] = 0x81;
//! reply[3] = 0x80;
//! reply[7] = 1;
//! reply.extend_from_slice(&[0xC0, 0x0C, 0, 1, 0, 1, 0, 0, 0x0E, 0x10, 0, 4, 93, 184, 216, 34]);
//!
//! let address = decode_response(&reply, 0xADDA, qname_len(&query)).unwrap();
//! assert_eq!(address.to_string(), "93.184.216.34");
//! ```

pub mod errors;
pub mod message;
pub mod name;
pub mod query;
pub mod response;
pub mod wire;

cfg_if::cfg_if! {
    if #[cfg(any(feature = "std", feature = "tokio-dep"))] {
        pub mod resolver;
    }
}
