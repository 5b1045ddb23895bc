//! # rawdns Resolver
//!
//! Resolves a hostname to an IPv4 address with one UDP request/response
//! exchange against a single name server.
//!
//! ## Available Features
//!
//! | Feature       | Description                                                         |
//! |---------------|---------------------------------------------------------------------|
//! | `std`         | Enables the **blocking** UDP resolver using the standard library.   |
//! | `tokio-dep`   | Enables the **asynchronous** resolver built on [Tokio](https://tokio.rs). |
//!
//! ## Quick Start
//!
//! ### Blocking (standard library)
//!
//! ```rust,no_run
//! use rawdns::dns::resolver::resolve_ipv4;
//!
//! match resolve_ipv4("example.com") {
//!     Ok(address) => println!("example.com IP: {address}"),
//!     Err(e) => eprintln!("DNS resolution failed: {e}"),
//! }
//! ```
//!
//! ### Asynchronous (Tokio)
//!
//! ```rust,ignore
//! use rawdns::dns::resolver::resolve_ipv4_async;
//!
//! #[tokio::main]
//! async fn main() {
//!     match resolve_ipv4_async("example.com").await {
//!         Ok(address) => println!("{address}"),
//!         Err(e) => eprintln!("IPv4 lookup failed: {e}"),
//!     }
//! }
//! ```
//!
//! ## Error Handling
//!
//! - [`ResolverErrors`] is what the public API returns. It keeps encoding,
//!   transport and decoding failures apart.
//! - [`UdpErrors`] covers socket failures, timeouts and oversized responses.
//!   A transport failure never reaches the decoder.
//!
//! The server and timeout come from [`transporter`] unless passed explicitly
//! to the `*_with` variants.
//!
//! There is no retry and no TCP fallback: each call sends one datagram and
//! reads at most one.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::dns::errors::{DecodeError, EncodeError};
use crate::dns::query::{encode_query, qname_len};
use crate::dns::response::decode_response;
use transporter::{get_server, get_timeout};

pub mod transporter;

/// Largest response accepted. One more octet is read so that a bigger
/// datagram is detected instead of being cut short.
pub const MAX_RESPONSE_SIZE: usize = 4096;

/// Errors from the UDP exchange itself.
#[derive(Error, Debug)]
pub enum UdpErrors {
    #[error("{0}")]
    SocketIo(#[from] std::io::Error),

    #[error("No response from the DNS name server within {0:?}")]
    Timeout(Duration),

    #[error("Response of {0} bytes exceeds the 4096 byte receive buffer")]
    ResponseTooLarge(usize),
}

/// Represents high-level resolver errors exposed to users.
#[derive(Error, Debug)]
pub enum ResolverErrors {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Transport(#[from] UdpErrors),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Wildcard local address of the same family as `server`.
fn local_bind_addr(server: SocketAddr) -> SocketAddr {
    match server {
        SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
        SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
    }
}

/// Cuts the receive buffer down to the datagram, rejecting oversized ones.
fn finish_receive(mut buf: Vec<u8>, len: usize) -> Result<Vec<u8>, UdpErrors> {
    if len > MAX_RESPONSE_SIZE {
        return Err(UdpErrors::ResponseTooLarge(len));
    }
    buf.truncate(len);
    debug!(size = len, "received response");
    Ok(buf)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        use std::io::ErrorKind;
        use std::net::UdpSocket;

        /// Resolves an IPv4 (`A`) record for `name` using a blocking UDP query
        /// against the configured server.
        ///
        /// # Errors
        /// Returns [`ResolverErrors`] if the query could not be encoded, sent,
        /// answered or decoded.
        pub fn resolve_ipv4(name: &str) -> Result<Ipv4Addr, ResolverErrors> {
            resolve_ipv4_with(name, get_server(), get_timeout())
        }

        /// Like [`resolve_ipv4`] but against an explicit server and timeout.
        pub fn resolve_ipv4_with(
            name: &str,
            server: SocketAddr,
            timeout: Duration,
        ) -> Result<Ipv4Addr, ResolverErrors> {
            let (query, id) = encode_query(name)?;
            let response = send_query_blocking(&query, server, timeout)?;
            let address = decode_response(&response, id, qname_len(&query))?;
            Ok(address)
        }

        /// Sends `query` to `server` and returns the single datagram it answers with.
        pub fn send_query_blocking(
            query: &[u8],
            server: SocketAddr,
            timeout: Duration,
        ) -> Result<Vec<u8>, UdpErrors> {
            let socket = UdpSocket::bind(local_bind_addr(server))?;
            socket.set_read_timeout(Some(timeout))?;
            socket.set_write_timeout(Some(timeout))?;
            // A connected socket only accepts datagrams from `server`.
            socket.connect(server)?;

            debug!(%server, size = query.len(), "sending query");
            socket.send(query)?;

            let mut buf = vec![0u8; MAX_RESPONSE_SIZE + 1];
            let len = match socket.recv(&mut buf) {
                Ok(len) => len,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    return Err(UdpErrors::Timeout(timeout));
                }
                Err(e) => return Err(UdpErrors::SocketIo(e)),
            };

            finish_receive(buf, len)
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio-dep")] {
        use tokio::net::UdpSocket as TokioUdpSocket;
        use tokio::time::timeout as tokio_timeout;

        /// Resolves an IPv4 (`A`) record for `name` without blocking the runtime.
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        pub async fn resolve_ipv4_async(name: &str) -> Result<Ipv4Addr, ResolverErrors> {
            resolve_ipv4_with_async(name, get_server(), get_timeout()).await
        }

        /// Like [`resolve_ipv4_async`] but against an explicit server and timeout.
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        pub async fn resolve_ipv4_with_async(
            name: &str,
            server: SocketAddr,
            timeout: Duration,
        ) -> Result<Ipv4Addr, ResolverErrors> {
            let (query, id) = encode_query(name)?;
            let response = send_query_async(&query, server, timeout).await?;
            let address = decode_response(&response, id, qname_len(&query))?;
            Ok(address)
        }

        /// Sends `query` to `server` and waits up to `timeout` for the answer.
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        pub async fn send_query_async(
            query: &[u8],
            server: SocketAddr,
            timeout: Duration,
        ) -> Result<Vec<u8>, UdpErrors> {
            let socket = TokioUdpSocket::bind(local_bind_addr(server)).await?;
            socket.connect(server).await?;

            debug!(%server, size = query.len(), "sending query");
            tokio_timeout(timeout, socket.send(query))
                .await
                .map_err(|_| UdpErrors::Timeout(timeout))??;

            let mut buf = vec![0u8; MAX_RESPONSE_SIZE + 1];
            let len = tokio_timeout(timeout, socket.recv(&mut buf))
                .await
                .map_err(|_| UdpErrors::Timeout(timeout))??;

            finish_receive(buf, len)
        }
    }
}
