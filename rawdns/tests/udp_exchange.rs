//! End-to-end exchanges against a throwaway UDP responder on localhost.
#![cfg(feature = "std")]

use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rawdns::dns::errors::DecodeError;
use rawdns::dns::query::encode_query_with_id;
use rawdns::dns::resolver::{ResolverErrors, UdpErrors, resolve_ipv4_with, send_query_blocking};

const TIMEOUT: Duration = Duration::from_secs(2);

/// How the fake server answers the one query it receives.
#[derive(Clone, Copy)]
enum Reply {
    Address([u8; 4]),
    Rcode(u8),
    WrongId,
    Oversized,
    Silent,
}

fn build_reply(query: &[u8], reply: Reply) -> Option<Vec<u8>> {
    let mut raw = query.to_vec();
    raw[2] = 0x81;
    raw[3] = 0x80;
    match reply {
        Reply::Address(octets) => {
            raw[7] = 1;
            raw.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2C, 0x00, 0x04]);
            raw.extend_from_slice(&octets);
        }
        Reply::Rcode(code) => raw[3] |= code,
        Reply::WrongId => {
            raw[0] ^= 0xFF;
            raw[7] = 1;
            raw.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2C, 0x00, 0x04]);
            raw.extend_from_slice(&[1, 2, 3, 4]);
        }
        Reply::Oversized => raw.resize(5000, 0),
        Reply::Silent => return None,
    }
    Some(raw)
}

/// Binds a responder on an ephemeral port that serves a single query.
fn spawn_responder(reply: Reply) -> (SocketAddr, JoinHandle<()>) {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let addr = socket.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let mut buf = [0u8; 512];
        let Ok((len, peer)) = socket.recv_from(&mut buf) else {
            return;
        };
        if let Some(raw) = build_reply(&buf[..len], reply) {
            socket.send_to(&raw, peer).unwrap();
        }
    });

    (addr, handle)
}

#[test]
fn test_resolves_address() {
    let (server, handle) = spawn_responder(Reply::Address([93, 184, 216, 34]));

    let address = resolve_ipv4_with("example.com", server, TIMEOUT).unwrap();

    assert_eq!(address, Ipv4Addr::new(93, 184, 216, 34));
    handle.join().unwrap();
}

#[test]
fn test_send_query_returns_exact_datagram() {
    let (server, handle) = spawn_responder(Reply::Address([10, 0, 0, 1]));
    let query = encode_query_with_id("example.com", 0x0102).unwrap();

    let response = send_query_blocking(&query, server, TIMEOUT).unwrap();

    assert_eq!(response.len(), query.len() + 16);
    assert_eq!(&response[..2], &[0x01, 0x02]);
    assert_eq!(&response[response.len() - 4..], &[10, 0, 0, 1]);
    handle.join().unwrap();
}

#[test]
fn test_nxdomain_is_server_error() {
    let (server, handle) = spawn_responder(Reply::Rcode(3));

    let result = resolve_ipv4_with("does-not-exist.example", server, TIMEOUT);

    assert!(matches!(
        result,
        Err(ResolverErrors::Decode(DecodeError::ServerError(3)))
    ));
    handle.join().unwrap();
}

#[test]
fn test_wrong_id_is_rejected() {
    let (server, handle) = spawn_responder(Reply::WrongId);

    let result = resolve_ipv4_with("example.com", server, TIMEOUT);

    assert!(matches!(
        result,
        Err(ResolverErrors::Decode(DecodeError::IdMismatch { .. }))
    ));
    handle.join().unwrap();
}

#[test]
fn test_oversized_response_is_reported() {
    let (server, handle) = spawn_responder(Reply::Oversized);

    let result = resolve_ipv4_with("example.com", server, TIMEOUT);

    assert!(matches!(
        result,
        Err(ResolverErrors::Transport(UdpErrors::ResponseTooLarge(_)))
    ));
    handle.join().unwrap();
}

#[test]
fn test_silent_server_times_out() {
    let (server, handle) = spawn_responder(Reply::Silent);
    let timeout = Duration::from_millis(200);

    let result = resolve_ipv4_with("example.com", server, timeout);

    assert!(matches!(
        result,
        Err(ResolverErrors::Transport(UdpErrors::Timeout(t))) if t == timeout
    ));
    handle.join().unwrap();
}

#[cfg(feature = "tokio-dep")]
mod tokio_transport {
    use super::*;
    use rawdns::dns::resolver::resolve_ipv4_with_async;

    #[tokio::test]
    async fn test_resolves_address_async() {
        let (server, handle) = spawn_responder(Reply::Address([1, 1, 1, 1]));

        let address = resolve_ipv4_with_async("one.one.one.one", server, TIMEOUT)
            .await
            .unwrap();

        assert_eq!(address, Ipv4Addr::new(1, 1, 1, 1));
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_nxdomain_async() {
        let (server, handle) = spawn_responder(Reply::Rcode(3));

        let result = resolve_ipv4_with_async("nope.example", server, TIMEOUT).await;

        assert!(matches!(
            result,
            Err(ResolverErrors::Decode(DecodeError::ServerError(3)))
        ));
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_silent_server_times_out_async() {
        let (server, handle) = spawn_responder(Reply::Silent);
        let timeout = Duration::from_millis(200);

        let result = resolve_ipv4_with_async("example.com", server, timeout).await;

        assert!(matches!(
            result,
            Err(ResolverErrors::Transport(UdpErrors::Timeout(t))) if t == timeout
        ));
        handle.join().unwrap();
    }
}
