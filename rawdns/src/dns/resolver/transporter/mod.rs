//! # DNS Transporter
//!
//! The `transporter` module holds the process-wide settings the resolver uses
//! to reach a name server: which server to ask and how long to wait for it.
//!
//! ## Defaults
//!
//! - server: `1.1.1.1:53`
//! - timeout: 3 seconds
//!
//! ## Public API
//!
//! - `get_server()` / `set_server(addr)` / `reset_server()` / `has_custom_server()`
//! - `get_timeout()` / `set_timeout(duration)` / `reset_timeout()`
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use rawdns::dns::resolver::transporter::{get_server, set_server, set_timeout, reset_server};
//!
//! set_server("9.9.9.9:53").expect("valid socket address");
//! set_timeout(Duration::from_secs(1)).expect("non-zero timeout");
//! println!("Asking {}", get_server());
//!
//! reset_server();
//! assert_eq!(get_server().to_string(), "1.1.1.1:53");
//! ```
//!
//! Only one server is consulted per resolution. The module performs no
//! network I/O itself; it only supplies validated settings to the transports
//! in the parent module.
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::RwLock;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Server used when none has been configured.
pub const DEFAULT_SERVER: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)), 53);

/// How long to wait for a response when no timeout has been configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Custom server, `None` means [`DEFAULT_SERVER`].
static CUSTOM_SERVER: RwLock<Option<SocketAddr>> = RwLock::new(None);

/// Custom timeout, `None` means [`DEFAULT_TIMEOUT`].
static CUSTOM_TIMEOUT: RwLock<Option<Duration>> = RwLock::new(None);

/// Returns the currently active name server.
pub fn get_server() -> SocketAddr {
    let custom = CUSTOM_SERVER.read().unwrap_or_else(|e| e.into_inner());
    custom.unwrap_or(DEFAULT_SERVER)
}

/// Replaces the active name server.
///
/// `server` must parse as a [`SocketAddr`] (e.g. `"ip:port"` or `"[ipv6]:port"`).
///
/// Returns:
/// - `Ok(())` if the server was set.
/// - `Err(TransporterErrors::InvalidServer)` otherwise; the active server is left unchanged.
pub fn set_server(server: &str) -> Result<(), TransporterErrors> {
    let addr = server
        .parse::<SocketAddr>()
        .map_err(|_| TransporterErrors::InvalidServer(server.to_string()))?;

    let mut custom = CUSTOM_SERVER.write().unwrap_or_else(|e| e.into_inner());
    *custom = Some(addr);
    debug!(%addr, "name server set");
    Ok(())
}

/// Restores [`DEFAULT_SERVER`].
pub fn reset_server() {
    let mut custom = CUSTOM_SERVER.write().unwrap_or_else(|e| e.into_inner());
    *custom = None;
}

/// Returns `true` if a custom server is currently active.
pub fn has_custom_server() -> bool {
    let custom = CUSTOM_SERVER.read().unwrap_or_else(|e| e.into_inner());
    custom.is_some()
}

/// Returns the currently active response timeout.
pub fn get_timeout() -> Duration {
    let custom = CUSTOM_TIMEOUT.read().unwrap_or_else(|e| e.into_inner());
    custom.unwrap_or(DEFAULT_TIMEOUT)
}

/// Replaces the response timeout. A zero duration is rejected.
pub fn set_timeout(timeout: Duration) -> Result<(), TransporterErrors> {
    if timeout.is_zero() {
        return Err(TransporterErrors::InvalidTimeout);
    }
    let mut custom = CUSTOM_TIMEOUT.write().unwrap_or_else(|e| e.into_inner());
    *custom = Some(timeout);
    Ok(())
}

/// Restores [`DEFAULT_TIMEOUT`].
pub fn reset_timeout() {
    let mut custom = CUSTOM_TIMEOUT.write().unwrap_or_else(|e| e.into_inner());
    *custom = None;
}

/// Errors that can occur when changing transport settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransporterErrors {
    /// Raised when a server string could not be parsed into a valid [`SocketAddr`].
    #[error("The server {0} is invalid")]
    InvalidServer(String),

    #[error("The timeout must be greater than zero")]
    InvalidTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    // The settings are process-wide, so every check that touches them lives
    // in this one test.
    #[test]
    fn test_settings_lifecycle() {
        assert_eq!(get_server(), DEFAULT_SERVER);
        assert!(!has_custom_server());
        assert_eq!(get_timeout(), DEFAULT_TIMEOUT);

        set_server("8.8.8.8:53").unwrap();
        assert!(has_custom_server());
        assert_eq!(get_server().to_string(), "8.8.8.8:53");

        assert_eq!(
            set_server("not-an-address"),
            Err(TransporterErrors::InvalidServer("not-an-address".to_string()))
        );
        assert_eq!(set_server("8.8.8.8"), Err(TransporterErrors::InvalidServer("8.8.8.8".to_string())));
        assert_eq!(get_server().to_string(), "8.8.8.8:53");

        set_server("[2606:4700:4700::1111]:53").unwrap();
        assert!(get_server().is_ipv6());

        reset_server();
        assert!(!has_custom_server());
        assert_eq!(get_server(), DEFAULT_SERVER);

        set_timeout(Duration::from_millis(250)).unwrap();
        assert_eq!(get_timeout(), Duration::from_millis(250));
        assert_eq!(set_timeout(Duration::ZERO), Err(TransporterErrors::InvalidTimeout));
        assert_eq!(get_timeout(), Duration::from_millis(250));

        reset_timeout();
        assert_eq!(get_timeout(), DEFAULT_TIMEOUT);
    }
}
