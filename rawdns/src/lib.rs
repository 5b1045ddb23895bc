#![cfg_attr(docsrs, feature(doc_cfg))]
//! # rawdns
//!
//! A small stub resolver that turns a hostname into an IPv4 address by
//! speaking the DNS wire protocol (RFC 1035) directly over UDP.
//!
//! ## Features
//!
//! - **Query encoding** - recursive `A`/`IN` queries with a random or caller-chosen id
//! - **Response decoding** - id correlation, RCODE checks and answer parsing for
//!   compressed and uncompressed owner names
//! - **Blocking resolver** (`std`, default) - one exchange over `std::net::UdpSocket`
//! - **Async resolver** (`tokio-dep`) - the same exchange over `tokio::net::UdpSocket`
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! rawdns = "0.1"
//! rawdns = { version = "0.1", features = ["tokio-dep"] }
//! rawdns = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,no_run
//! use rawdns::dns::resolver::resolve_ipv4;
//!
//! let address = resolve_ipv4("example.com").unwrap();
//! println!("example.com IP: {}", address);
//! ```
//!
//! With `default-features = false` only the codec is built; bring your own
//! transport:
//!
//! ```rust,ignore
//! use rawdns::dns::query::{encode_query, qname_len};
//! use rawdns::dns::response::decode_response;
//!
//! let (query, id) = encode_query("example.com")?;
//! let reply = my_transport.exchange(&query)?;
//! let address = decode_response(&reply, id, qname_len(&query))?;
//! ```
//!
//! ## Logging
//!
//! The crate reports through [`tracing`]: `debug` for query and answer
//! summaries, `trace` for hex dumps of every packet. Install a subscriber to
//! see them.
//!
//! ## Scope
//!
//! IPv4 lookups only, one question per message, one server, no retries,
//! no caching and no TCP fallback.

pub mod dns;
