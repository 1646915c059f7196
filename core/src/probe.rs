//! # Liveness Probing
//!
//! Decides whether a single address is reachable. The production prober
//! shells out to the system echo utility; ICMP itself is delegated to the
//! OS so no raw sockets (and no root) are needed.
//!
//! The check is layered: a successful echo settles the verdict on its own,
//! and is followed by a best-effort TCP connect whose outcome is observed
//! but never changes the result. ICMP is blocked on many networks, which is
//! why the TCP side exists at all; a failed echo ends the probe immediately.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::trace;

use sweepr_common::config::ScanConfig;

/// Capability interface for a single-address liveness check.
///
/// Infallible by contract: permission denials, spawn failures and timeouts
/// all collapse to `false`.
#[async_trait]
pub trait EchoProber: Send + Sync {
    async fn is_alive(&self, addr: Ipv4Addr) -> bool;
}

/// Probes with the operating system's `ping` utility.
pub struct SystemPinger {
    echo_timeout_ms: u64,
    fallback_port: u16,
}

impl SystemPinger {
    pub fn new(cfg: &ScanConfig) -> Self {
        Self {
            echo_timeout_ms: cfg.echo_timeout_ms,
            fallback_port: cfg.fallback_port,
        }
    }

    /// One echo request; success criterion is a zero exit status.
    async fn echo(&self, addr: Ipv4Addr) -> bool {
        #[cfg(target_os = "windows")]
        let output = Command::new("ping")
            .args(["-n", "1", "-w", &self.echo_timeout_ms.to_string()])
            .arg(addr.to_string())
            .output()
            .await;

        // Linux ping takes the reply timeout in whole seconds.
        #[cfg(not(target_os = "windows"))]
        let output = Command::new("ping")
            .args(["-c", "1", "-W", &self.echo_timeout_ms.div_ceil(1_000).to_string()])
            .arg(addr.to_string())
            .output()
            .await;

        output.map(|out| out.status.success()).unwrap_or(false)
    }

    /// Best-effort TCP confirmation after a successful echo. The outcome is
    /// logged and discarded: a host that answered the echo counts as alive
    /// even when the fallback port is closed.
    async fn tcp_confirm(&self, addr: Ipv4Addr) {
        let socket_addr = SocketAddr::new(IpAddr::V4(addr), self.fallback_port);
        let connect_timeout = Duration::from_secs(1);

        match timeout(connect_timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_stream)) => trace!("tcp confirmation succeeded for {addr}"),
            Ok(Err(_)) | Err(_) => trace!("tcp confirmation inconclusive for {addr}"),
        }
    }
}

#[async_trait]
impl EchoProber for SystemPinger {
    async fn is_alive(&self, addr: Ipv4Addr) -> bool {
        if !self.echo(addr).await {
            return false;
        }

        self.tcp_confirm(addr).await;
        true
    }
}
