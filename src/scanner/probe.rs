//! TCP connect probe.
//!
//! One bounded-timeout connection attempt per port. Every failure cause
//! (refused, timed out, unreachable, unresolvable host) collapses into
//! "not reachable"; the scanner reports binary reachability only.

use crate::types::Port;
use async_trait::async_trait;
use std::net::Ipv6Addr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// A single reachability check against one host:port.
///
/// The trait is the seam between the scan engine and the transport: engine
/// tests substitute a deterministic probe, production uses [`TcpProbe`].
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// Attempt to reach `host:port` within `timeout`. Never retries and
    /// never blocks past the timeout.
    async fn probe(&self, host: &str, port: Port, timeout: Duration) -> bool;
}

/// Probe backed by a real TCP connection.
///
/// Uses the operating system's connect() via tokio. On success the
/// connection is dropped immediately; there is no side effect beyond the
/// transient handshake.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

#[async_trait]
impl Probe for TcpProbe {
    async fn probe(&self, host: &str, port: Port, limit: Duration) -> bool {
        let addr = join_host_port(host, port);
        matches!(timeout(limit, TcpStream::connect(addr.as_str())).await, Ok(Ok(_)))
    }
}

/// Join a host and port into a dialable address, bracketing IPv6 literals.
fn join_host_port(host: &str, port: Port) -> String {
    if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn port(n: u16) -> Port {
        Port::new(n).unwrap()
    }

    #[test]
    fn test_join_host_port() {
        assert_eq!(join_host_port("127.0.0.1", port(80)), "127.0.0.1:80");
        assert_eq!(join_host_port("example.com", port(443)), "example.com:443");
        assert_eq!(join_host_port("::1", port(80)), "[::1]:80");
    }

    #[tokio::test]
    async fn test_probe_open_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let bound = listener.local_addr().unwrap().port();

        let open = TcpProbe
            .probe("127.0.0.1", port(bound), Duration::from_secs(1))
            .await;
        assert!(open);
    }

    #[tokio::test]
    async fn test_probe_closed_port() {
        // Bind then drop so the port is known free.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let freed = listener.local_addr().unwrap().port();
        drop(listener);

        let open = TcpProbe
            .probe("127.0.0.1", port(freed), Duration::from_millis(500))
            .await;
        assert!(!open);
    }

    #[tokio::test]
    async fn test_probe_unresolvable_host() {
        let open = TcpProbe
            .probe(
                "host.invalid.portsweep.test",
                port(80),
                Duration::from_millis(500),
            )
            .await;
        assert!(!open);
    }
}
